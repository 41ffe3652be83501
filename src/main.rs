use anyhow::Result;
use clap::Parser;
use study_research::cli::{Args, Command};
use study_research::research::workflow::{launch, topic_from_words};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.to_config()?;

    match &args.command {
        Command::Research(research) => {
            let topic = topic_from_words(&research.topic);
            if let Err(e) = launch(&config, &topic).await {
                eprintln!("❌ 调研失败: {:?}", e);
                return Err(e);
            }
        }
        Command::Synthesize(synthesize) => {
            if let Err(e) =
                study_research::synthesis::launch(&config, &synthesize.input, synthesize.stdout)
                    .await
            {
                eprintln!("❌ 综合失败: {:?}", e);
                return Err(e);
            }
        }
    }

    Ok(())
}
