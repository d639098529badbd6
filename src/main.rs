use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();
    pocketpet::app::run()
}
