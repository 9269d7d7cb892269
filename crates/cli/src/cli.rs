use clap::{builder::NonEmptyStringValueParser, Parser};
use totpgen::Algorithm;

#[derive(Debug, Parser)]
#[command(
    name = "totpgen",
    about = "Generates time-based one-time passwords (RFC 6238)",
    version
)]
pub struct Args {
    #[arg(short, long, help = "Enable debug logs")]
    pub debug: bool,

    #[arg(
        short,
        long,
        env = "TOTPGEN_SECRET",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new(),
        help = "Secret key for the OTP"
    )]
    pub secret: String,

    #[arg(
        long,
        default_value_t = Algorithm::Sha1,
        help = "Hashing algorithm (SHA1, SHA256, SHA512)"
    )]
    pub alg: Algorithm,

    #[arg(
        long,
        default_value_t = 6,
        allow_negative_numbers = true,
        help = "Number of digits for the OTP code (ex. 6, 8)"
    )]
    pub digits: i32,

    #[arg(
        long,
        default_value_t = 30,
        allow_negative_numbers = true,
        help = "Time step in seconds (ex. 30, 60)"
    )]
    pub step: i64,

    #[arg(
        long,
        value_name = "UNIX_SECS",
        help = "Generate for this instant instead of the current time"
    )]
    pub at: Option<u64>,

    #[arg(long, help = "Print only the code")]
    pub code_only: bool,
}
