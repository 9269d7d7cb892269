use anyhow::Context;
use clap::Parser;
use log::debug;
use std::process;
use totpgen::Totp;

mod cli;

use cli::Args;

fn main() {
    let args = Args::parse();

    init_console_logger(args.debug);

    match run(&args) {
        Ok(output) => println!("{}", output),
        Err(err) => {
            eprintln!("Error while generating TOTP: {:#}", err);
            process::exit(1)
        }
    }
}

fn init_console_logger(debug: bool) {
    let mut log_builder = env_logger::Builder::from_default_env();

    if debug {
        log_builder.filter(None, log::LevelFilter::Debug);
    } else {
        log_builder.filter(None, log::LevelFilter::Error);
    }
    log_builder.target(env_logger::Target::Stderr);
    log_builder.init();
}

fn run(args: &Args) -> anyhow::Result<String> {
    let secret = args.secret.as_bytes();
    let totp = match args.at {
        Some(secs) => {
            debug!("using fixed instant {}", secs);
            Totp::at(secret, args.alg, args.step, args.digits, secs)
        }
        None => Totp::new(secret, args.alg, args.step, args.digits),
    };
    let mut totp = totp.context("invalid TOTP parameters")?;
    let code = totp.get().context("failed to derive code")?;

    if args.code_only {
        return Ok(code.to_string());
    }
    Ok(format!(
        "TOTP generated (Alg: {}, Digits: {}, Step: {}): {}",
        totp.algorithm(),
        args.digits,
        totp.step(),
        code
    ))
}

#[cfg(test)]
mod tests {
    use clap::{error::ErrorKind, Parser};
    use test_case::test_case;

    use super::run;
    use crate::cli::Args;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("totpgen").chain(argv.iter().copied()))
    }

    #[test]
    fn prints_the_code_with_parameters() {
        let args = parse(&["--secret", "12345678901234567890", "--at", "59"]).unwrap();
        assert_eq!(
            run(&args).unwrap(),
            "TOTP generated (Alg: SHA1, Digits: 6, Step: 30): 287082"
        );
    }

    // RFC 6238 Appendix B
    #[test_case("SHA1", "12345678901234567890", "94287082")]
    #[test_case("SHA256", "12345678901234567890123456789012", "46119246")]
    #[test_case(
        "SHA512",
        "1234567890123456789012345678901234567890123456789012345678901234",
        "90693936"
    )]
    fn prints_only_the_code(alg: &str, secret: &str, expected: &str) {
        let args = parse(&[
            "--secret",
            secret,
            "--alg",
            alg,
            "--digits",
            "8",
            "--at",
            "59",
            "--code-only",
        ])
        .unwrap();
        assert_eq!(run(&args).unwrap(), expected);
    }

    #[test]
    fn pads_codes_wider_than_the_format_width_limit() {
        let args = parse(&[
            "--secret",
            "12345678901234567890",
            "--digits",
            "70000",
            "--at",
            "59",
            "--code-only",
        ])
        .unwrap();
        let code = run(&args).unwrap();
        assert_eq!(code.len(), 70_000);
        assert!(code.ends_with("0001094287082"));
    }

    #[test]
    fn uses_the_system_clock_without_at() {
        let args = parse(&["-s", "12345678901234567890", "--code-only"]).unwrap();
        let code = run(&args).unwrap();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test_case("--step", "0", "time step")]
    #[test_case("--step", "-1", "time step")]
    #[test_case("--digits", "0", "digits")]
    #[test_case("--digits", "-1", "digits")]
    fn reports_invalid_parameters(flag: &str, value: &str, message: &str) {
        let args = parse(&["--secret", "abc", "--at", "59", flag, value]).unwrap();
        let err = run(&args).unwrap_err();
        assert!(format!("{:#}", err).contains(message));
    }

    #[test]
    fn rejects_unknown_algorithms() {
        let err = parse(&["--secret", "abc", "--alg", "MD5"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn rejects_an_empty_secret() {
        let err = parse(&["--secret", ""]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn accepts_lowercase_algorithm_names() {
        let args = parse(&["--secret", "abc", "--alg", "sha512"]).unwrap();
        assert_eq!(args.alg, totpgen::Algorithm::Sha512);
    }
}
