use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::{error, info};
use quiz_ia::config::{clock_seed, gemini_client, gemini_config};
use quiz_ia::data::DEFAULT_BANK_PATH;
use quiz_ia::protocol::DEFAULT_PORT;
use quiz_ia::{
    generate_questions, load_bank, prepare_questions, QuestionCount, QuestionFormat,
    QuestionOrder, QuizConfig, QuizError, ServerConfig,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    gemini: GeminiArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve quizzes over WebSocket
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Question bank to load
        #[arg(short, long, default_value = DEFAULT_BANK_PATH)]
        bank: PathBuf,
    },
    /// Print a reproducible selection from a question bank as JSON
    Select {
        /// Question bank to load
        #[arg(short, long, default_value = DEFAULT_BANK_PATH)]
        bank: PathBuf,

        /// Number of questions, or "all"
        #[arg(short, long, default_value_t = QuestionCount::default())]
        count: QuestionCount,

        /// "random" or "sequential"
        #[arg(short, long, default_value = "random")]
        order: QuestionOrder,

        /// "truefalse" or "multiplechoice"
        #[arg(short, long, default_value = "truefalse")]
        format: QuestionFormat,

        /// Seed; defaults to the current time
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Print generated questions as JSON
    Generate {
        /// Number of questions, or "all"
        #[arg(short, long, default_value_t = QuestionCount::default())]
        count: QuestionCount,

        /// "truefalse" or "multiplechoice"
        #[arg(short, long, default_value = "truefalse")]
        format: QuestionFormat,

        /// Seed; defaults to the current time
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

#[derive(Args, Debug)]
struct GeminiArgs {
    /// Gemini API key; without one, built-in questions and local feedback are used
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    gemini_api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", global = true)]
    gemini_model: Option<String>,

    /// Gemini API base URL
    #[arg(long, env = "GEMINI_BASE_URL", global = true)]
    gemini_base_url: Option<String>,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    pretty_env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), QuizError> {
    let gemini = gemini_config(
        cli.gemini.gemini_api_key,
        cli.gemini.gemini_model,
        cli.gemini.gemini_base_url,
    );

    match cli.command {
        Command::Serve { port, bank } => {
            let config = ServerConfig {
                port,
                bank_path: bank,
                gemini,
            };
            quiz_ia::server::run(config).await
        }
        Command::Select {
            bank,
            count,
            order,
            format,
            seed,
        } => {
            let questions = load_bank(&bank)?;
            let seed = seed.unwrap_or_else(clock_seed);
            info!("Selecting from {} questions with seed {}", questions.len(), seed);

            let config = QuizConfig {
                format,
                count,
                order,
                ..QuizConfig::default()
            };
            let selected = prepare_questions(&questions, &config, seed);
            println!("{}", serde_json::to_string_pretty(&selected)?);
            Ok(())
        }
        Command::Generate {
            count,
            format,
            seed,
        } => {
            let llm = gemini_client(gemini)?;
            let seed = seed.unwrap_or_else(clock_seed);
            info!("Generating questions with seed {}", seed);

            let questions = generate_questions(llm.as_ref(), count, format, seed).await;
            println!("{}", serde_json::to_string_pretty(&questions)?);
            Ok(())
        }
    }
}

