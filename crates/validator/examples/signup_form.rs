//! Validates a sign-up form with built-in, combined and custom rules.
//!
//! Run with `cargo run --example signup_form`.

use std::time::Duration;

use fieldcheck_validator::prelude::*;

const TAKEN: [&str; 2] = ["admin", "root"];

#[tokio::main]
async fn main() -> Result<(), RuleError> {
    let form = MapSource::new()
        .with("signup[email]", "ada@example")
        .with("signup[username]", "root")
        .with("signup[website]", "")
        .with("signup[dob_y]", "2023")
        .with("signup[dob_m]", "02")
        .with("signup[dob_d]", "29");
    form.set_checked("signup[terms]", true);

    let config = ValidatorConfig::new().with_prefix("signup");
    let mut engine = ValidationEngine::with_config(form, config);

    engine.field(["email"]).required(true).email();
    engine.field(["username"]).alpha_dash().length_between(3, 20);
    engine.field(["website"]).required(false).url();
    engine.field(["terms"]).accepted();
    engine
        .combine(["dob_y", "dob_m", "dob_d"])
        .set_glue("-")
        .set_name("dob");
    engine.field(["dob"]).is_date("Y-m-d");
    engine
        .set_message(["dob"])
        .rule("isdate", "Pick a real birthday");

    // Pretend availability lives behind a remote call.
    engine
        .extend(["username"], |input, verdict| {
            let name = input.text().unwrap_or_default().to_string();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                verdict.decide(!TAKEN.contains(&name.as_str()));
            });
        })
        .with_message("Username is already taken");

    engine.on(Event::Fails, || println!("form has errors"));
    engine.on(Event::Passes, || println!("form is valid"));

    let state = engine.exec().await?;
    println!("pass finished: {state:?}");
    for (field, message) in engine.messages(true) {
        println!("  {field}: {message}");
    }
    Ok(())
}
