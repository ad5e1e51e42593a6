//! Decode a hex-encoded `ContractCall` and print what it would invoke.
//!
//! Usage: `call_decode <hex>` or pipe the hex on stdin.

use std::env;
use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use lib_executor::proxy::{METHOD_DELEGATION, METHOD_TRANSFER_DELEGATION};
use lib_executor::ContractCall;
use lib_types::Address;

fn main() {
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let hex = read_hex_arg_or_stdin();
    if let Err(e) = decode_and_inspect(&hex) {
        eprintln!("ERROR: {e:#}");
        std::process::exit(1);
    }
}

fn read_hex_arg_or_stdin() -> String {
    let mut args = env::args().skip(1);
    if let Some(hex) = args.next() {
        return hex.trim().to_string();
    }

    let mut input = String::new();
    io::stdin().read_to_string(&mut input).unwrap_or(0);
    input.trim().to_string()
}

fn decode_and_inspect(hex_call: &str) -> Result<()> {
    if hex_call.is_empty() {
        bail!("no hex provided (arg or stdin)");
    }

    let bytes = hex::decode(hex_call.trim_start_matches("0x")).context("invalid hex")?;
    let call = ContractCall::from_bytes(&bytes).context("not a bincode ContractCall")?;
    call.validate_structure(usize::MAX)
        .context("call structure is invalid")?;

    tracing::debug!(bytes = bytes.len(), "decoded call");

    println!("method: {}", call.method);
    println!("params_len: {}", call.params.len());
    if !call.params.is_empty() {
        println!("params_hex: {}", hex::encode(&call.params));
    }

    match call.method.as_str() {
        METHOD_DELEGATION => println!("handled_by: front door"),
        METHOD_TRANSFER_DELEGATION => {
            let target: Address = call.decode_params().context("bad transfer_delegation params")?;
            println!("handled_by: front door");
            println!("new_target: {}", target);
        }
        _ => println!("handled_by: forwarded to the current delegation target"),
    }

    Ok(())
}
