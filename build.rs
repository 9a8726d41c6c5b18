use dotenvy::dotenv_iter;
use embuild::espidf;

fn main() {
    load_dotenv_variables();

    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        espidf::sysenv::output();
    }
}

/// Bakes the `.env` secrets (WiFi credentials) into the firmware image.
///
/// The board has no `.env` to read at runtime, so every `KEY=VALUE` pair is
/// forwarded to rustc as `cargo:rustc-env=KEY=VALUE` and picked up by `env!`
/// in `config.rs`.
///
/// # Security Note
/// The credentials end up in plain text in flash. Anyone with the binary can
/// read them.
fn load_dotenv_variables() {
    println!("cargo:rerun-if-changed=.env");

    if let Ok(iter) = dotenv_iter() {
        for item in iter {
            let (key, value) = item.expect("Failed to read .env element");
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}
