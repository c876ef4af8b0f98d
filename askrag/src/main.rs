use askrag::config::Config;
use askrag::evaluation::{
    evaluate, AnswerRelevancyMetric, ContextualRelevancyMetric, HallucinationMetric, Metric,
};
use askrag::llm::{prompts, Completer, LlmApiClient};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "askrag")]
#[command(about = "Ask an OpenAI-compatible model, optionally with context, and grade the answer")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send a prompt and print the reply
    Complete { prompt: String },
    /// Answer a query using the given context
    Rag {
        query: String,
        #[arg(long)]
        context: String,
    },
    /// Print a prompt template, filling slots given as key=value
    Template {
        name: String,
        #[arg(long = "var", value_parser = parse_key_val)]
        vars: Vec<(String, String)>,
    },
    /// Complete a prompt and grade the reply with the judge model
    Eval {
        prompt: String,
        /// Answer from this context and grade contextual relevancy
        #[arg(long)]
        context: Option<String>,
        #[arg(long, default_value_t = 0.5)]
        hallucination_threshold: f32,
        #[arg(long, default_value_t = 0.7)]
        relevancy_threshold: f32,
        /// Print the evaluation report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "askrag=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();

    match args.command {
        Command::Template { name, vars } => {
            let rendered = if vars.is_empty() {
                prompts::get_template(&name)?.to_string()
            } else {
                let values: Vec<(&str, &str)> = vars
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str()))
                    .collect();
                prompts::render_template(&name, &values)?
            };
            print!("{rendered}");
        }
        Command::Complete { prompt } => {
            let client = LlmApiClient::new(&config.llm)?;
            println!("{}", client.get_completion(&prompt).await?);
        }
        Command::Rag { query, context } => {
            let client = LlmApiClient::new(&config.llm)?;
            println!("{}", client.get_rag_completion(&query, &context).await?);
        }
        Command::Eval {
            prompt,
            context,
            hallucination_threshold,
            relevancy_threshold,
            json,
        } => {
            let client = LlmApiClient::new(&config.llm)?;
            let judge = LlmApiClient::new(&config.judge_config())?;
            tracing::info!("Judging with model {}", judge.model());

            let evaluation = match context {
                Some(context) => {
                    let response = client.get_rag_completion(&prompt, &context).await?;
                    println!("{response}\n");

                    let contextual = ContextualRelevancyMetric::new(
                        relevancy_threshold,
                        prompt.as_str(),
                        response.as_str(),
                        context.as_str(),
                    );
                    let hallucination = HallucinationMetric::new(
                        hallucination_threshold,
                        prompt.as_str(),
                        response.as_str(),
                    )
                    .with_contexts(vec![context]);

                    let metrics: [&dyn Metric; 2] = [&contextual, &hallucination];
                    evaluate(&judge, &metrics).await?
                }
                None => {
                    let response = client.get_completion(&prompt).await?;
                    println!("{response}\n");

                    let hallucination = HallucinationMetric::new(
                        hallucination_threshold,
                        prompt.as_str(),
                        response.as_str(),
                    );
                    let relevancy = AnswerRelevancyMetric::new(
                        relevancy_threshold,
                        prompt.as_str(),
                        response.as_str(),
                    );

                    let metrics: [&dyn Metric; 2] = [&hallucination, &relevancy];
                    evaluate(&judge, &metrics).await?
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&evaluation)?);
            } else {
                print!("{evaluation}");
            }

            if !evaluation.success {
                anyhow::bail!("evaluation failed");
            }
        }
    }

    Ok(())
}
