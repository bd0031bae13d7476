//! TensorSeal packer CLI.
//!
//! `seal` wraps a plaintext model file into the `nonce || ciphertext`
//! envelope consumed by the loader. `unseal` is the diagnostic inverse.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use rand::rngs::OsRng;
use rand::RngCore;

use tensorseal_core::{seal, unseal, EnvKey, FileKey, FixedKey, KeySource, KEY_LEN, NONCE_LEN};

const USAGE: &str = "usage:
  tensorseal seal   --in <model> --out <sealed> <key option>
  tensorseal unseal --in <sealed> --out <model> <key option>

key options (exactly one):
  --key-hex <32 hex chars>    key on the command line (testing only)
  --key-env <VAR>             32 hex chars from an environment variable
  --key-file <path>           32 hex chars from a file";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Seal,
    Unseal,
}

struct Config {
    command: Command,
    input: PathBuf,
    output: PathBuf,
    keys: Box<dyn KeySource>,
}

fn parse_args() -> Result<Config, String> {
    let mut args = env::args().skip(1);

    let command = match args.next().as_deref() {
        Some("seal") => Command::Seal,
        Some("unseal") => Command::Unseal,
        Some(other) => return Err(format!("unknown command '{}'", other)),
        None => return Err("missing command".into()),
    };

    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut keys: Option<Box<dyn KeySource>> = None;

    while let Some(flag) = args.next() {
        let value = args
            .next()
            .ok_or_else(|| format!("missing value for {}", flag))?;
        match flag.as_str() {
            "--in" => input = Some(PathBuf::from(value)),
            "--out" => output = Some(PathBuf::from(value)),
            "--key-hex" => {
                if keys.is_some() {
                    return Err("multiple key options".into());
                }
                let raw = hex::decode(value.trim()).map_err(|_| "invalid key hex".to_string())?;
                let bytes: [u8; KEY_LEN] = raw
                    .try_into()
                    .map_err(|_| format!("key must be {} bytes", KEY_LEN))?;
                keys = Some(Box::new(FixedKey::new(bytes)));
            }
            "--key-env" => {
                if keys.is_some() {
                    return Err("multiple key options".into());
                }
                keys = Some(Box::new(EnvKey::new(value)));
            }
            "--key-file" => {
                if keys.is_some() {
                    return Err("multiple key options".into());
                }
                keys = Some(Box::new(FileKey::new(value)));
            }
            other => return Err(format!("unknown flag '{}'", other)),
        }
    }

    Ok(Config {
        command,
        input: input.ok_or("missing --in")?,
        output: output.ok_or("missing --out")?,
        keys: keys.ok_or("missing key option")?,
    })
}

fn run(config: &Config) -> Result<(), String> {
    // Fail on a bad key source before touching the input, and give the
    // operator something safe to compare keys by.
    let fingerprint = config
        .keys
        .load()
        .map_err(|e| e.to_string())?
        .fingerprint();
    eprintln!("key fingerprint: {}", fingerprint);

    match config.command {
        Command::Seal => {
            let plaintext = fs::read(&config.input)
                .map_err(|e| format!("read {}: {}", config.input.display(), e))?;

            let mut nonce = [0u8; NONCE_LEN];
            OsRng.fill_bytes(&mut nonce);

            let sealed =
                seal(&plaintext, &nonce, config.keys.as_ref()).map_err(|e| e.to_string())?;
            fs::write(&config.output, &sealed)
                .map_err(|e| format!("write {}: {}", config.output.display(), e))?;

            eprintln!(
                "sealed {} bytes -> {} ({} bytes)",
                plaintext.len(),
                config.output.display(),
                sealed.len()
            );
        }
        Command::Unseal => {
            let sealed = fs::read(&config.input)
                .map_err(|e| format!("read {}: {}", config.input.display(), e))?;

            let plaintext =
                unseal(&sealed, config.keys.as_ref()).map_err(|e| e.to_string())?;

            eprintln!("warning: writing decrypted model bytes to disk (diagnostic use only)");
            fs::write(&config.output, plaintext.as_bytes())
                .map_err(|e| format!("write {}: {}", config.output.display(), e))?;

            eprintln!(
                "unsealed {} bytes -> {}",
                plaintext.len(),
                config.output.display()
            );
        }
    }

    Ok(())
}

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("error: {}", msg);
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    if let Err(msg) = run(&config) {
        eprintln!("error: {}", msg);
        process::exit(1);
    }
}
