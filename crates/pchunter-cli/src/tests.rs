use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["pchunter"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn scan_collects_model_words() {
    let cli = Cli::try_parse_from(["pchunter", "scan", "dell", "latitude", "5420"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Scan { ref model, json: false }) if model.join(" ") == "dell latitude 5420"
    ));
}

#[test]
fn scan_json_flag() {
    let cli = Cli::try_parse_from(["pchunter", "scan", "thinkpad", "--json"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Scan { json: true, .. })
    ));
}

#[test]
fn scan_requires_a_model() {
    assert!(Cli::try_parse_from(["pchunter", "scan"]).is_err());
}

#[test]
fn search_takes_free_text() {
    let cli = Cli::try_parse_from(["pchunter", "search", "i7 12th gen 16gb"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Search { ref query, json: false, cost: None }) if query == &["i7 12th gen 16gb"]
    ));
}

#[test]
fn search_accepts_a_buying_cost() {
    let cli =
        Cli::try_parse_from(["pchunter", "search", "i5", "1145g7", "--cost", "90000"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Search { cost: Some(90_000), ref query, .. }) if query.len() == 2
    ));
}

#[test]
fn parse_and_price_take_text() {
    let cli = Cli::try_parse_from(["pchunter", "parse", "iphone", "13", "pro"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Parse { ref text }) if text.len() == 3));

    let cli = Cli::try_parse_from(["pchunter", "price", "62 000 DA"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Price { ref text }) if text == &["62 000 DA"]));
}

#[test]
fn assess_parses_all_prices() {
    let cli = Cli::try_parse_from([
        "pchunter",
        "assess",
        "--cost",
        "90000",
        "--avg",
        "100000",
        "--max",
        "120000",
        "--threshold",
        "85000",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Assess {
            cost: 90_000,
            avg: 100_000,
            max: 120_000,
            threshold: 85_000
        })
    ));
}

#[test]
fn assess_requires_every_price() {
    assert!(Cli::try_parse_from(["pchunter", "assess", "--cost", "90000"]).is_err());
}

#[test]
fn alerts_defaults_to_an_hour() {
    let cli = Cli::try_parse_from(["pchunter", "alerts"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Alerts { since_minutes: 60 })
    ));

    let cli = Cli::try_parse_from(["pchunter", "alerts", "--since-minutes", "15"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Alerts { since_minutes: 15 })
    ));
}
