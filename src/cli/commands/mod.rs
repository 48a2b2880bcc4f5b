use crate::sender::action::ActionKind;
use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::ValueParser,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub fn validator_is_file() -> ValueParser {
    ValueParser::from(move |s: &str| -> std::result::Result<PathBuf, String> {
        if let Ok(metadata) = fs::metadata(s)
            && metadata.is_file()
        {
            return Ok(PathBuf::from(s));
        }

        Err(format!("Invalid file path or file does not exist: '{s}'"))
    })
}

pub fn new(config_path: &Path) -> Command {
    // get config file path (default: ~/.config/s3sender/config.yml)
    let config_file_path = config_path.join("config.yml");

    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("s3sender")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("host")
            .help("Host defined in the config file")
            .required(true)
            .num_args(1)
        )
        .arg(
            Arg::new("message")
            .help("Default object key, used when --file-name is not set")
            .num_args(1)
        )
        .arg(
            Arg::new("actions")
            .help(format!("Actions to run in order, comma or space separated: {}", ActionKind::names().join(", ")))
            .long("actions")
            .short('a')
            .required(true)
            .num_args(1)
        )
        .arg(
            Arg::new("bucket")
            .help("Bucket name")
            .long("bucket")
            .short('b')
            .required(true)
            .num_args(1)
        )
        .arg(
            Arg::new("destination-bucket")
            .help("Destination bucket of copy")
            .long("destination-bucket")
            .num_args(1)
        )
        .arg(
            Arg::new("file")
            .help("File to upload")
            .long("file")
            .short('f')
            .value_parser(validator_is_file())
            .num_args(1)
        )
        .arg(
            Arg::new("file-name")
            .help("Object key, overrides the message")
            .long("file-name")
            .short('k')
            .num_args(1)
        )
        .arg(
            Arg::new("destination-file-name")
            .help("Object key of the copy")
            .long("destination-file-name")
            .num_args(1)
        )
        .arg(
            Arg::new("content-type")
            .help("Content type of the upload [default: application/octet-stream]")
            .long("content-type")
            .num_args(1)
        )
        .arg(
            Arg::new("bucket-region")
            .help("Region of buckets created with --global-bucket-access")
            .long("bucket-region")
            .num_args(1)
        )
        .arg(
            Arg::new("create-buckets")
            .help("Create missing buckets on upload and copy")
            .long("create-buckets")
            .num_args(0)
        )
        .arg(
            Arg::new("accelerate")
            .help("Enable transfer acceleration on created buckets (extra costs)")
            .long("accelerate")
            .num_args(0)
        )
        .arg(
            Arg::new("global-bucket-access")
            .help("Create buckets in --bucket-region instead of the host region")
            .long("global-bucket-access")
            .num_args(0)
        )
        .arg(
            Arg::new("tolerate-existing")
            .help("createBucket succeeds when the bucket already exists")
            .long("tolerate-existing")
            .num_args(0)
        )
        .arg(
            Arg::new("output")
            .help("Write downloaded content to this file instead of STDOUT")
            .long("output")
            .short('o')
            .value_parser(clap::value_parser!(PathBuf))
            .num_args(1)
        )
        .arg(
            Arg::new("config")
            .default_value(config_file_path.into_os_string())
            .long("config")
            .num_args(1)
            .short('c')
            .value_parser(validator_is_file())
            .value_name("config.yml")
        )
        .arg(
            Arg::new("verbose")
            .help("Verbosity level")
            .short('v')
            .long("verbose")
            .global(true)
            .action(ArgAction::Count)
        )
}
