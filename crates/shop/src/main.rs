use chrono::Local;

use shelfrate_catalog::ProductStore;
use shelfrate_shop::{ShopConfig, run_demo};

fn main() -> anyhow::Result<()> {
    shelfrate_observability::init();

    let config = ShopConfig::from_env();
    let store = ProductStore::for_locale(&config.locale);

    for section in run_demo(&store, Local::now().date_naive())? {
        println!("{section}");
    }
    Ok(())
}
