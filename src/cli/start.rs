use crate::cli::{Config, Host, commands};
use crate::s3::{Credentials, S3};
use crate::sender::{
    ActionKind, Parameters, Sender, SenderConfig, Session,
    action::parse_actions,
    params::{CONTENT_TYPE, DESTINATION_FILE_NAME, FILE, FILE_NAME},
};
use crate::storage::ObjectBody;
use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use futures::TryStreamExt;
use secrecy::SecretString;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Session key the CLI stores downloaded content under
pub const DOWNLOAD_SESSION_KEY: &str = "download";

/// A configured sender plus the inputs of a single run
pub struct Invocation {
    pub sender: Sender,
    pub parameters: Parameters,
    pub output: Option<PathBuf>,
}

/// # Errors
///
/// Will return `Err` if the config directory can not be created
pub fn get_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().map_or_else(|| PathBuf::from("/tmp"), |h| h);

    let config_path = Path::new(&home_dir).join(".config").join("s3sender");
    fs::create_dir_all(&config_path)
        .context(format!("unable to create: {}", &config_path.display()))?;

    Ok(config_path)
}

/// # Errors
///
/// Will return `Err` if the config file or the sender configuration is invalid
pub fn start() -> Result<Invocation> {
    let config_path = get_config_path()?;

    // start the command line interface
    let cmd = commands::new(&config_path);

    // get the matches
    let matches = cmd.get_matches();

    let verbosity_level = match matches.get_count("verbose") {
        0 => log::LevelFilter::Off,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(verbosity_level)
        .init();

    log::info!("config path: {}", config_path.display());

    from_matches(&matches, &config_path)
}

/// Build the invocation out of parsed arguments.
///
/// # Errors
///
/// Will return `Err` if the host is unknown, the file can not be opened or the
/// sender configuration is invalid
pub fn from_matches(matches: &ArgMatches, config_path: &Path) -> Result<Invocation> {
    let config_file = matches
        .get_one::<PathBuf>("config")
        .ok_or_else(|| anyhow!("no config file found"))?;

    let config = Config::new(config_file)?;

    log::debug!("config: {config:#?}");

    let name = matches
        .get_one::<String>("host")
        .ok_or_else(|| anyhow!("No \"host\" found, for more information try {}", "--help".green()))?;

    let host = get_host(&config, config_path, name)?;

    // REGION
    let region = host.get_region()?;

    // AUTH
    let credentials = Credentials::new(
        &host.access_key,
        &SecretString::new(host.secret_key.clone().into()),
    );

    let actions = matches
        .get_one::<String>("actions")
        .ok_or_else(|| anyhow!("No actions found, for more information try {}", "--help".green()))?;

    let bucket = matches
        .get_one::<String>("bucket")
        .ok_or_else(|| anyhow!("No bucket found, for more information try {}", "--help".green()))?;

    let mut sender_config = SenderConfig::new(actions, bucket);
    sender_config.name.clone_from(name);
    sender_config.client_region = region.name().to_string();
    sender_config.destination_bucket_name = matches.get_one::<String>("destination-bucket").cloned();
    sender_config.bucket_region = matches.get_one::<String>("bucket-region").cloned();
    sender_config.bucket_creation_enabled = matches.get_flag("create-buckets");
    sender_config.accelerate_mode_enabled = matches.get_flag("accelerate");
    sender_config.force_global_bucket_access_enabled = matches.get_flag("global-bucket-access");
    sender_config.tolerate_existing_bucket = matches.get_flag("tolerate-existing");

    let listed = parse_actions(actions).unwrap_or_default();
    if listed.contains(&ActionKind::Download) {
        sender_config.store_result_in_session_key = Some(DOWNLOAD_SESSION_KEY.to_string());
    }

    let mut parameters = Parameters::new();

    if let Some(message) = matches.get_one::<String>("message") {
        parameters = parameters.with_message(message);
    }

    for (arg, parameter) in [
        ("file-name", FILE_NAME),
        ("destination-file-name", DESTINATION_FILE_NAME),
        ("content-type", CONTENT_TYPE),
    ] {
        if let Some(value) = matches.get_one::<String>(arg) {
            sender_config = sender_config.with_parameter(parameter);
            parameters = parameters.with_text(parameter, value);
        }
    }

    // upload the file or read from STDIN
    if let Some(file) = matches.get_one::<PathBuf>("file") {
        let file = fs::File::open(file)
            .with_context(|| format!("could not open file: {}", file.display()))?;
        sender_config = sender_config.with_parameter(FILE);
        parameters = parameters.with_stream(
            FILE,
            ObjectBody::from_reader(tokio::fs::File::from_std(file)),
        );
    } else if listed.contains(&ActionKind::Upload) {
        log::info!("no file given, reading from STDIN");
        sender_config = sender_config.with_parameter(FILE);
        parameters = parameters.with_stream(FILE, ObjectBody::from_reader(tokio::io::stdin()));
    }

    let s3 = S3::new(credentials, region);

    let sender = Sender::new(sender_config, Arc::new(s3))?;

    Ok(Invocation {
        sender,
        parameters,
        output: matches.get_one::<PathBuf>("output").cloned(),
    })
}

/// Send once, downloaded content goes to `--output` or STDOUT.
///
/// # Errors
///
/// Will return `Err` if an action fails or the content can not be written
pub async fn run(invocation: Invocation) -> Result<()> {
    let Invocation {
        sender,
        mut parameters,
        output,
    } = invocation;

    let mut session = Session::new();
    let result = sender.send(&mut parameters, &mut session).await?;

    let Some(body) = session.take(DOWNLOAD_SESSION_KEY) else {
        println!("{result}");
        return Ok(());
    };

    if let Some(path) = output {
        let mut file = tokio::fs::File::create(&path)
            .await
            .with_context(|| format!("could not create file: {}", path.display()))?;
        let written = write_body(body, &mut file).await?;
        log::info!("{written} bytes written to {}", path.display());
    } else {
        let mut stdout = tokio::io::stdout();
        write_body(body, &mut stdout).await?;
    }

    Ok(())
}

async fn write_body<W>(body: ObjectBody, writer: &mut W) -> Result<u64>
where
    W: AsyncWrite + Unpin,
{
    let mut stream = body.into_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.try_next().await? {
        writer.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    writer.flush().await?;

    Ok(written)
}

fn get_host<'a>(config: &'a Config, config_path: &Path, name: &str) -> Result<&'a Host> {
    config.get_host(name).map_err(|_| {
        anyhow!(
            "Could not find host: \"{}\". Check config file {}/config.yml, For more information try {}",
            name.red(),
            config_path.display(),
            "--help".green()
        )
    })
}
