//! phrasekit: BIP-39 mnemonic command-line tool
//!
//! Commands:
//!   generate                 - new mnemonic from fresh entropy
//!   from-entropy <hex>       - encode existing entropy as a mnemonic
//!   validate [<phrase>]      - check a phrase and print the entropy it encodes
//!   seed [<phrase>]          - derive the 64-byte seed (optional passphrase)
//!   detect [<phrase>]        - identify the word list a phrase comes from
//!   expand [<phrase>]        - complete abbreviated words
//!   config show              - display current configuration
//!
//! Phrases may be omitted on the command line and read from stdin instead,
//! which keeps them out of shell history.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use phrasekit_codec::{Entropy, Mnemonic};
use phrasekit_core::config::PhraseKitConfig;
use phrasekit_core::Language;

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "phrasekit",
    version,
    about = "BIP-39 mnemonic toolkit",
    long_about = "phrasekit: generate, validate and expand BIP-39 mnemonics and derive their seeds"
)]
struct Cli {
    /// Path to phrasekit configuration file
    #[arg(
        long,
        short = 'c',
        env = "PHRASEKIT_CONFIG",
        default_value = "~/.config/phrasekit/config.toml"
    )]
    config: PathBuf,

    /// Log level / filter directive (overrides config)
    #[arg(long, env = "PHRASEKIT_LOG")]
    log: Option<String>,

    /// Log format (overrides config)
    #[arg(long, env = "PHRASEKIT_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Debug, ValueEnum, PartialEq)]
enum LogFormat {
    Json,
    Text,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a new mnemonic from CSPRNG entropy
    Generate {
        /// Entropy size in bits: 128, 160, 192, 224 or 256 (default: config)
        #[arg(long, short = 'b')]
        bits: Option<usize>,
        /// Word list language (default: config)
        #[arg(long, short = 'l')]
        language: Option<Language>,
        /// Print JSON instead of the bare phrase
        #[arg(long)]
        json: bool,
    },

    /// Encode hex entropy as a mnemonic
    #[command(name = "from-entropy")]
    FromEntropy {
        /// 32, 40, 48, 56 or 64 hex digits
        entropy: String,
        #[arg(long, short = 'l')]
        language: Option<Language>,
        #[arg(long)]
        json: bool,
    },

    /// Validate a mnemonic and print its entropy
    Validate {
        /// Mnemonic phrase (read from stdin when omitted)
        phrase: Option<String>,
        #[arg(long, short = 'l')]
        language: Option<Language>,
        #[arg(long)]
        json: bool,
    },

    /// Derive the 64-byte BIP-39 seed of a mnemonic
    ///
    /// The phrase is validated first; an invalid phrase yields no seed.
    Seed {
        /// Mnemonic phrase (read from stdin when omitted)
        phrase: Option<String>,
        #[arg(long, short = 'l')]
        language: Option<Language>,
        /// Optional passphrase ("25th word")
        #[arg(
            long,
            env = "PHRASEKIT_PASSPHRASE",
            hide_env_values = true,
            conflicts_with = "prompt_passphrase"
        )]
        passphrase: Option<String>,
        /// Read the passphrase from the terminal without echo
        #[arg(long)]
        prompt_passphrase: bool,
    },

    /// Detect which word list a mnemonic uses
    Detect {
        /// Mnemonic phrase (read from stdin when omitted)
        phrase: Option<String>,
    },

    /// Expand abbreviated words to full list words
    Expand {
        /// Possibly abbreviated phrase (read from stdin when omitted)
        phrase: Option<String>,
        #[arg(long, short = 'l')]
        language: Option<Language>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the active configuration (merged defaults + config file)
    Show,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = expand_tilde(&cli.config);
    let config = PhraseKitConfig::load(&config_path)?;

    let level = cli.log.as_deref().unwrap_or(&config.logging.level);
    let format = match cli.log_format {
        Some(format) => format,
        None => LogFormat::from_str(&config.logging.format, true)
            .map_err(|e| anyhow::anyhow!("logging.format: {e}"))?,
    };
    init_logging(level, &format)?;

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path.display(),
        "phrasekit starting"
    );

    match cli.command {
        Commands::Generate { bits, language, json } => cmd_generate(&config, bits, language, json),
        Commands::FromEntropy { entropy, language, json } => {
            cmd_from_entropy(&config, &entropy, language, json)
        }
        Commands::Validate { phrase, language, json } => {
            cmd_validate(&config, phrase, language, json)
        }
        Commands::Seed { phrase, language, passphrase, prompt_passphrase } => {
            cmd_seed(&config, phrase, language, passphrase, prompt_passphrase)
        }
        Commands::Detect { phrase } => cmd_detect(phrase),
        Commands::Expand { phrase, language } => cmd_expand(&config, phrase, language),
        Commands::Config { action: ConfigAction::Show } => cmd_config_show(&config, &config_path),
    }
}

fn init_logging(level: &str, format: &LogFormat) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => log_filter(level)?,
    };

    // stdout carries phrases and seeds; logs go to stderr
    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}

/// Filter from a `--log` / `logging.level` directive.
fn log_filter(directive: &str) -> Result<tracing_subscriber::EnvFilter> {
    tracing_subscriber::EnvFilter::try_new(directive)
        .with_context(|| format!("invalid log filter {directive:?}"))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn expand_tilde(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    if let Some(rest) = s.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_default();
        PathBuf::from(home).join(rest)
    } else {
        path.to_path_buf()
    }
}

/// Phrase from the argument, or the first line of stdin.
fn read_phrase(arg: Option<String>) -> Result<SecretString> {
    if let Some(phrase) = arg {
        return Ok(SecretString::from(phrase));
    }
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading phrase from stdin")?;
    let phrase = line.trim_end_matches(['\r', '\n']).to_string();
    if phrase.is_empty() {
        anyhow::bail!("no phrase given (pass it as an argument or on stdin)");
    }
    Ok(SecretString::from(phrase))
}

fn resolve_passphrase(passphrase: Option<String>, prompt: bool) -> Result<SecretString> {
    if prompt {
        let entered = rpassword::prompt_password("Passphrase: ").context("reading passphrase")?;
        return Ok(SecretString::from(entered));
    }
    Ok(SecretString::from(passphrase.unwrap_or_default()))
}

#[derive(Serialize)]
struct MnemonicOutput {
    language: Language,
    word_count: usize,
    phrase: String,
    entropy: String,
}

impl MnemonicOutput {
    fn new(mnemonic: &Mnemonic) -> Self {
        Self {
            language: mnemonic.language(),
            word_count: mnemonic.word_count(),
            phrase: mnemonic.to_string(),
            entropy: mnemonic.to_entropy().to_hex(),
        }
    }
}

fn print_mnemonic(mnemonic: &Mnemonic, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(&MnemonicOutput::new(mnemonic))
            .context("serializing mnemonic to JSON")?;
        println!("{out}");
    } else {
        println!("{mnemonic}");
    }
    Ok(())
}

// ── `phrasekit generate` / `from-entropy` ─────────────────────────────────────

fn cmd_generate(
    config: &PhraseKitConfig,
    bits: Option<usize>,
    language: Option<Language>,
    json: bool,
) -> Result<()> {
    let bits = bits.unwrap_or(config.defaults.entropy_bits);
    let language = language.unwrap_or(config.defaults.language);
    let mnemonic = Mnemonic::generate(bits, language)
        .with_context(|| format!("generating {bits}-bit {language} mnemonic"))?;
    print_mnemonic(&mnemonic, json)
}

fn cmd_from_entropy(
    config: &PhraseKitConfig,
    entropy: &str,
    language: Option<Language>,
    json: bool,
) -> Result<()> {
    let language = language.unwrap_or(config.defaults.language);
    let entropy = Entropy::from_hex(entropy)?;
    print_mnemonic(&Mnemonic::from_entropy(&entropy, language), json)
}

// ── `phrasekit validate` ──────────────────────────────────────────────────────

fn cmd_validate(
    config: &PhraseKitConfig,
    phrase: Option<String>,
    language: Option<Language>,
    json: bool,
) -> Result<()> {
    let phrase = read_phrase(phrase)?;
    let language = language.unwrap_or(config.defaults.language);
    let mnemonic = Mnemonic::parse(phrase.expose_secret(), language)
        .with_context(|| format!("invalid {language} mnemonic"))?;

    if json {
        print_mnemonic(&mnemonic, true)
    } else {
        println!("valid: {} words, {} bits", mnemonic.word_count(), mnemonic.to_entropy().bit_len());
        println!("entropy: {}", mnemonic.to_entropy().to_hex());
        Ok(())
    }
}

// ── `phrasekit seed` ──────────────────────────────────────────────────────────

fn cmd_seed(
    config: &PhraseKitConfig,
    phrase: Option<String>,
    language: Option<Language>,
    passphrase: Option<String>,
    prompt_passphrase: bool,
) -> Result<()> {
    let phrase = read_phrase(phrase)?;
    let passphrase = resolve_passphrase(passphrase, prompt_passphrase)?;
    let language = language.unwrap_or(config.defaults.language);

    let seed = phrasekit_codec::to_seed(phrase.expose_secret(), passphrase.expose_secret(), language)
        .with_context(|| format!("invalid {language} mnemonic"))?;
    println!("{}", seed.to_hex());
    Ok(())
}

// ── `phrasekit detect` / `expand` ─────────────────────────────────────────────

fn cmd_detect(phrase: Option<String>) -> Result<()> {
    let phrase = read_phrase(phrase)?;
    let language = phrasekit_codec::detect_language(phrase.expose_secret())?;
    println!("{language}");
    Ok(())
}

fn cmd_expand(
    config: &PhraseKitConfig,
    phrase: Option<String>,
    language: Option<Language>,
) -> Result<()> {
    let phrase = read_phrase(phrase)?;
    let language = language.unwrap_or(config.defaults.language);
    println!("{}", phrasekit_codec::expand(phrase.expose_secret(), language));
    Ok(())
}

// ── `phrasekit config show` ───────────────────────────────────────────────────

fn cmd_config_show(config: &PhraseKitConfig, config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("# Configuration from: {}", config_path.display());
    } else {
        println!("# Configuration: defaults (no file at {})", config_path.display());
    }
    println!();
    let rendered = toml::to_string_pretty(config).context("serializing config to TOML")?;
    print!("{rendered}");
    Ok(())
}
