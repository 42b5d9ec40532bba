use clap::Args;

use crate::config::Config;

#[derive(Args)]
pub struct ClassifyArgs {
    /// Free-text transaction description
    pub text: String,
}

pub async fn run(args: ClassifyArgs, config: &Config) -> anyhow::Result<()> {
    let classifier = config.classifier()?;
    println!("{}", classifier.classify(&args.text));
    Ok(())
}
