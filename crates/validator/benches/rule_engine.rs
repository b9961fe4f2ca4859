// Rule engine benchmarks.
//
// Measures single predicate calls, date parsing and a full pass over a
// realistic sign-up form with an in-memory source.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use fieldcheck_validator::date::DateFormat;
use fieldcheck_validator::prelude::*;
use fieldcheck_validator::rules::{Between, Email, Url};

fn single_rules(c: &mut Criterion) {
    let email = Value::from("ada.lovelace@example.com");
    let url = Value::from("https://example.com/path?query=1");
    let number = Value::from("42.5");
    let bounds = [Param::from(0), Param::from(100)];

    let mut group = c.benchmark_group("rules");
    group.bench_function("email", |b| {
        b.iter(|| Email.check(&RuleContext::new("email", Some(black_box(&email)), &[])));
    });
    group.bench_function("url", |b| {
        b.iter(|| Url.check(&RuleContext::new("site", Some(black_box(&url)), &[])));
    });
    group.bench_function("between", |b| {
        b.iter(|| Between.check(&RuleContext::new("n", Some(black_box(&number)), &bounds)));
    });
    group.finish();
}

fn date_parsing(c: &mut Criterion) {
    let format = DateFormat::compile("Y-m-d H:i:s").unwrap();

    let mut group = c.benchmark_group("date");
    group.bench_function("compile", |b| {
        b.iter(|| DateFormat::compile(black_box("d/m/Y")));
    });
    group.bench_function("parse", |b| {
        b.iter(|| format.parse(black_box("2024-02-29 13:45:00")));
    });
    group.finish();
}

fn signup_engine() -> ValidationEngine {
    let source = MapSource::new()
        .with("signup[email]", "ada@example.com")
        .with("signup[username]", "ada_l")
        .with("signup[password]", "correct horse battery staple")
        .with("signup[confirm]", "correct horse battery staple")
        .with("signup[age]", "36")
        .with("signup[dob_y]", "1988")
        .with("signup[dob_m]", "12")
        .with("signup[dob_d]", "10");

    let mut engine =
        ValidationEngine::with_config(source, ValidatorConfig::new().with_prefix("signup"));
    engine.field(["email"]).required(true).email().length_max(254);
    engine.field(["username"]).alpha_dash().length_between(3, 20);
    engine.field(["password"]).length_min(12).min_words(3);
    engine.field(["confirm"]).equals_strict("correct horse battery staple");
    engine.field(["age"]).is_int().between(13, 120);
    engine
        .combine(["dob_y", "dob_m", "dob_d"])
        .set_glue("-")
        .set_name("dob");
    engine.field(["dob"]).is_date("Y-m-d").before("2010-01-01", "Y-m-d");
    engine
}

fn full_pass(c: &mut Criterion) {
    let mut engine = signup_engine();

    c.bench_function("engine/signup_pass", |b| {
        b.iter(|| futures::executor::block_on(engine.exec()));
    });
}

criterion_group!(benches, single_rules, date_parsing, full_pass);
criterion_main!(benches);
