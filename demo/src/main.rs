use anyhow::Result;
use demo::fibonacci::{measure_time, HakaseMemo};
use demo::settings::AppConfig;
use memoproxy::{info, Memoized};

fn main() -> Result<()> {
    let config = AppConfig::bundled()?;
    let memoized = memoproxy::create::<HakaseMemo, _>(())?;
    info!("Memoizing {:?}", Memoized::shape(&memoized).method_ids());
    for &index in &config.fibonacci.indexes {
        if config.fibonacci.compare_plain {
            measure_time("Plain", &HakaseMemo::default(), index)?;
        }
        measure_time("Memoized", &memoized, index)?;
    }
    Ok(())
}
