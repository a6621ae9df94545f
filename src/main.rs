use clap::Parser;
use cml_reconcile::{cli, config, error, export, input};
use cml_reconcile_common::{categorize, group_readings, match_locations};
use cli::{Cli, Commands};
use config::Config;
use error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    let config = Config::load()?;

    match cli.command {
        Commands::Reconcile { existing, readings, output, report, min_confidence, no_fuzzy } => {
            eprintln!("🔎 cml-reconcile - CML照合\n");

            let mut options = config.match_options();
            if let Some(value) = min_confidence {
                config::check_confidence(value)?;
                options.min_confidence = value;
            }
            if no_fuzzy {
                options.allow_fuzzy_match = false;
            }

            // 1. 入力読み込み
            eprintln!("[1/3] 入力を読み込み中...");
            let locations = input::load_existing(&existing)?;
            let new_readings = input::load_readings(&readings)?;
            eprintln!("✔ 既存位置 {}件 / 測定値 {}件\n", locations.len(), new_readings.len());

            // 2. 照合
            eprintln!("[2/3] 照合中... (最低信頼度: {:.2})", options.min_confidence);
            let result = match_locations(&locations, &new_readings, &options);
            let summary = &result.summary;
            eprintln!(
                "✔ 照合 {}件 / 未照合 {}件 (照合率 {:.1}%)\n",
                summary.matched_count,
                summary.unmatched_count,
                summary.match_rate * 100.0
            );

            // 3. 出力
            eprintln!("[3/3] 結果を出力中...");
            export::write_json(&result, output.as_deref())?;
            if let Some(report) = report {
                let title = config.report_title.clone().unwrap_or_else(|| {
                    format!("CML照合レポート_{}", chrono::Local::now().format("%Y%m%d"))
                });
                let path = export::report_path(&report, &title);
                export::excel::write_excel(&result, &path, &title)?;
                eprintln!("✔ Excel出力: {}", path.display());
            }

            for u in &result.unmatched {
                eprintln!("  - 未照合: {} ({})", u.reading.raw_label, u.reason);
            }

            eprintln!("\n✅ 照合完了");
        }

        Commands::Categorize { texts } => {
            for text in texts {
                let result = categorize(&text);
                print!("{}: {}", text, result.category);
                if let Some(size) = &result.nozzle_size {
                    print!(" / 径 {}", size);
                }
                if let Some(nozzle_type) = &result.nozzle_type {
                    print!(" / 種別 {}", nozzle_type);
                }
                println!();
            }
        }

        Commands::Group { readings } => {
            let new_readings = input::load_readings(&readings)?;
            for group in group_readings(&new_readings) {
                println!("{} ({}件)", group.name, group.readings.len());
                for r in &group.readings {
                    println!("  {}  {:.3}", r.raw_label, r.thickness_value);
                }
            }
        }

        Commands::Config { set_min_confidence, set_allow_fuzzy, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(value) = set_min_confidence {
                config.set_min_confidence(value)?;
                changed = true;
                println!("✔ 最低信頼度を {:.2} に設定しました", value);
            }

            if let Some(value) = set_allow_fuzzy {
                config.allow_fuzzy_match = value;
                changed = true;
                println!("✔ 類似度照合を{}にしました", if value { "有効" } else { "無効" });
            }

            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("設定:");
                println!("  最低信頼度: {:.2}", config.min_confidence);
                println!("  類似度照合: {}", if config.allow_fuzzy_match { "有効" } else { "無効" });
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
