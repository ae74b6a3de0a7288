use super::{history, ui};
use crate::core::{ConversionRequest, Credential, RateProvider, convert};
use anyhow::Result;

pub async fn run(
    provider: &dyn RateProvider,
    credential: Credential,
    from: &str,
    to: &str,
    amount: f64,
) -> Result<()> {
    let request = ConversionRequest {
        source_code: from.to_uppercase(),
        target_code: to.to_uppercase(),
        amount,
        credential,
    };

    let pb = ui::new_spinner("Fetching exchange rate...");
    let result = convert(provider, &request).await;
    pb.finish_and_clear();

    let record = result?;
    println!("{}", history::format_result(&record));
    Ok(())
}
