extern crate log;
extern crate pretty_env_logger;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use fluorkin::config::Config;
use fluorkin::errors::{FluorkinError, Result};
use fluorkin::io::{
    extract_field, read_channel_table, read_report, write_field_table, write_report,
    write_slope_report,
};
use fluorkin::processing::{analyze_channel, slope_channel};
use fluorkin::qa::{QaTrace, write_qa_traces_json};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Run parameters (TOML). Defaults apply when the file does not exist.
    #[arg(short, long, default_value = "fluorkin.toml")]
    config: PathBuf,
    /// Write the default config to the --config path and exit.
    #[arg(long, action)]
    write_template: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect transients in each channel table and write per-channel reports
    Analyze {
        /// One table per configured channel, in channel order
        files: Vec<PathBuf>,
        #[arg(short, long, default_value = "fluorkin_output")]
        output_dir: PathBuf,
    },
    /// Manually pick one peak per column and report endpoint rates
    Slope {
        file: PathBuf,
        #[arg(short, long, default_value = "fluorkin_output")]
        output_dir: PathBuf,
    },
    /// Pull measurement rows out of written reports, grouped by source column
    Extract {
        reports: Vec<PathBuf>,
        /// Measurement row name; may be given more than once
        #[arg(short, long, default_value = "Amplitude of Peak")]
        field: Vec<String>,
        #[arg(short, long, default_value = "fluorkin_output")]
        output_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let args = Cli::parse();

    if args.write_template {
        let config = Config::default();
        let config_str = toml::to_string_pretty(&config)
            .map_err(|e| FluorkinError::ParseError { msg: e.to_string() })?;
        if std::fs::metadata(&args.config).is_ok() {
            return Err(FluorkinError::ParseError {
                msg: format!("config file already exists: {}", args.config.display()),
            });
        }
        std::fs::write(&args.config, config_str).map_err(|e| FluorkinError::Io {
            source: e,
            path: Some(args.config.clone()),
        })?;
        println!("Wrote default config to {}", args.config.display());
        return Ok(());
    }

    let config = if args.config.exists() {
        Config::from_toml(&args.config)?
    } else {
        log::info!("no config at {}, using defaults", args.config.display());
        Config::default()
    };

    match args.command {
        Some(Command::Analyze { files, output_dir }) => analyze(&config, &files, &output_dir),
        Some(Command::Slope { file, output_dir }) => slope(&config, &file, &output_dir),
        Some(Command::Extract {
            reports,
            field,
            output_dir,
        }) => extract(&reports, &field, &output_dir),
        None => {
            log::warn!("no subcommand given, nothing to do");
            Ok(())
        }
    }
}

fn analyze(config: &Config, files: &[PathBuf], output_dir: &Path) -> Result<()> {
    if files.len() != config.channels.len() {
        return Err(FluorkinError::ChannelCountMismatch {
            configured: config.channels.len(),
            provided: files.len(),
        });
    }
    create_output_dir(output_dir)?;

    let mut qa_all: Vec<QaTrace> = Vec::new();
    for (channel, file) in config.channels.iter().zip(files) {
        log::info!("reading {} table from {}", channel.name, file.display());
        let table = read_channel_table(file)?;
        let (features, qa) = analyze_channel(channel, &table, config);
        log::info!(
            "{}: {} column(s), {} reported peak(s)",
            channel.name,
            table.columns.len(),
            features.len()
        );
        let out = output_dir.join(format!("{}.csv", channel.name));
        write_report(&out, &features)?;
        qa_all.extend(qa);
    }

    if let Some(ref name) = config.output.qa_traces_json {
        let out = output_dir.join(name);
        write_qa_traces_json(&out, &qa_all)?;
        log::info!("wrote QA traces to {}", out.display());
    }
    Ok(())
}

fn slope(config: &Config, file: &Path, output_dir: &Path) -> Result<()> {
    create_output_dir(output_dir)?;
    let table = read_channel_table(file)?;
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    let rows = slope_channel(&table, config, &mut input, &mut output)?;
    let out = output_dir.join("slope.csv");
    write_slope_report(&out, &rows)?;
    log::info!("wrote {} slope row(s) to {}", rows.len(), out.display());
    Ok(())
}

fn extract(reports: &[PathBuf], fields: &[String], output_dir: &Path) -> Result<()> {
    create_output_dir(output_dir)?;
    for path in reports {
        let report = read_report(path)?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "report".to_string());
        for field in fields {
            let groups = extract_field(&report, field)?;
            let out = output_dir.join(format!("{}-{}.csv", stem, slug(field)));
            write_field_table(&out, &groups)?;
            log::info!(
                "{}: extracted {:?} for {} column(s) -> {}",
                path.display(),
                field,
                groups.len(),
                out.display()
            );
        }
    }
    Ok(())
}

fn create_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| FluorkinError::Io {
        source: e,
        path: Some(dir.to_path_buf()),
    })
}

fn slug(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}
