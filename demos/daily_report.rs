use std::env;
use stock_ledger::{
    process_with_verification, read_sheet_from_path, select_active_day, to_markdown,
    DaySummary, LedgerConfig,
};

fn main() {
    let mut args = env::args().skip(1);
    let sheet_path = args
        .next()
        .expect("usage: daily_report <sheet.csv> [config.json]");

    let config = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path).expect("config file should be readable");
            LedgerConfig::from_json(&json).expect("config should be valid")
        }
        None => LedgerConfig::default(),
    };

    let sheet = read_sheet_from_path(&sheet_path).expect("sheet should be readable CSV");
    let (days, report) =
        process_with_verification(&config, &sheet, 1e-9).expect("ledger should reconcile");

    println!("Days in sheet: {}", days.len());
    for day in &days {
        let summary = DaySummary::from_day(day);
        println!(
            " - {}: received {}, sold {}, waste {}, remain {}",
            summary.date_label,
            summary.total_received,
            summary.total_sold,
            summary.total_waste,
            summary.total_remain
        );
    }

    if !report.negative_remain.is_empty() {
        println!("Negative stock:");
        for anomaly in &report.negative_remain {
            println!(
                " - day {} product {}: {}",
                anomaly.day_number, anomaly.code, anomaly.remain
            );
        }
    }

    if let Some(day) = select_active_day(&days) {
        println!();
        println!("{}", to_markdown(day));
    }
}
