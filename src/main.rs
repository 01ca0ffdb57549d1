use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use name_match_common::{
    category_options, name_candidates, resolve_selection, run_matching, Advisory, CategorySource,
    ColumnRequest, Scorer,
};
use name_match_rust::{cli, config, error, export, reader, report, selector};
use cli::{Cli, Commands};
use config::{Config, DEFAULT_OUTPUT_FILE};
use error::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "name_match_rust=debug,name_match_common=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

struct RunArgs {
    subject: PathBuf,
    reference: PathBuf,
    subject_sheet: Option<String>,
    reference_sheet: Option<String>,
    request: ColumnRequest,
    no_fuzzy: bool,
    threshold: Option<f64>,
    scorer: Option<Scorer>,
    output: Option<PathBuf>,
    preview: Option<usize>,
    interactive: bool,
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Run {
            subject,
            reference,
            subject_sheet,
            reference_sheet,
            subject_column,
            reference_column,
            category_column,
            no_category,
            no_fuzzy,
            threshold,
            scorer,
            output,
            preview,
            interactive,
        } => run_matching_command(
            &config,
            RunArgs {
                subject,
                reference,
                subject_sheet,
                reference_sheet,
                request: ColumnRequest {
                    subject_name: subject_column,
                    reference_name: reference_column,
                    reference_category: category_column,
                    no_category,
                },
                no_fuzzy,
                threshold,
                scorer,
                output,
                preview,
                interactive,
            },
        )?,

        Commands::Inspect { file, sheet } => inspect(&file, sheet.as_deref())?,

        Commands::Config { threshold, scorer, fuzzy, show } => {
            let mut config = config;
            let changed = threshold.is_some() || scorer.is_some() || fuzzy.is_some();

            if let Some(threshold) = threshold {
                config.threshold = threshold;
            }
            if let Some(scorer) = scorer {
                config.scorer = scorer;
            }
            if let Some(fuzzy) = fuzzy {
                config.enable_fuzzy = fuzzy;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  あいまい一致: {}", if config.enable_fuzzy { "有効" } else { "無効" });
                println!("  閾値: {}", config.threshold);
                println!("  スコアラー: {}", config.scorer);
                println!("  プレビュー行数: {}", config.preview_rows);
            }
        }
    }

    Ok(())
}

fn run_matching_command(config: &Config, args: RunArgs) -> Result<()> {
    println!("🔎 name-match - 名簿照合\n");

    let options = config.match_options_with(args.no_fuzzy, args.threshold, args.scorer);
    options.validate()?;

    // 1. 読み込み
    println!("[1/4] ファイルを読み込み中...");
    let (subject_sheet, reference_sheet) = if args.interactive {
        (
            selector::select_sheet(
                "分類対象",
                &reader::list_sheets(&args.subject)?,
                args.subject_sheet.as_deref(),
            )?,
            selector::select_sheet(
                "参照表",
                &reader::list_sheets(&args.reference)?,
                args.reference_sheet.as_deref(),
            )?,
        )
    } else {
        (args.subject_sheet, args.reference_sheet)
    };
    let subject = reader::load_table(&args.subject, subject_sheet.as_deref())?;
    let reference = reader::load_table(&args.reference, reference_sheet.as_deref())?;
    println!("✔ 分類対象: {}行 / 参照表: {}行\n", subject.len(), reference.len());

    // 2. 列の選択
    println!("[2/4] 列を選択中...");
    let request = if args.interactive {
        selector::complete_request(&subject.headers, &reference.headers, args.request)?
    } else {
        args.request
    };
    if request.reference_category.is_none()
        && !request.no_category
        && category_options(&reference.headers).advisory == Some(Advisory::NoCategoryColumn)
    {
        println!("⚠ 参照表に分類列らしき列がありません。見つかった/見つからないのみ判定します");
        println!("  （--category-column で列を指定できます）");
    }
    let selection = resolve_selection(&subject.headers, &reference.headers, &request)?;
    println!("  分類対象の名前列: {}", selection.subject_name);
    println!("  参照表の名前列:   {}", selection.reference_name);
    match &selection.reference_category {
        CategorySource::Column(c) => println!("  参照表の分類列:   {}", c),
        CategorySource::None => println!("  参照表の分類列:   (なし)"),
    }
    println!();

    // 3. 照合
    println!(
        "[3/4] 照合中...{}",
        if options.enable_fuzzy {
            format!(" (あいまい一致: {} ≥ {})", options.scorer, options.threshold)
        } else {
            " (完全一致のみ)".to_string()
        }
    );
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]") {
        spinner.set_style(style);
    }
    spinner.set_message("照合中");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = run_matching(&subject, &reference, &selection, &options);
    spinner.finish_and_clear();
    let output = result?;
    println!("✔ 照合完了\n");

    report::print_summary(&output.summary);
    report::print_preview(&output.table, args.preview.unwrap_or(config.preview_rows));
    if output.summary.not_found > 0 {
        report::print_unmatched_sample(&output.table, &selection.subject_name);
    }

    // 4. 保存
    println!("\n[4/4] 結果を保存中...");
    let output_path = export::output_path(args.output.as_deref(), DEFAULT_OUTPUT_FILE);
    export::excel::write_matched_workbook(&output.table, &output_path)?;
    println!("✔ Excel出力: {}", output_path.display());

    println!("\n✅ 完了");
    Ok(())
}

fn inspect(file: &Path, sheet: Option<&str>) -> Result<()> {
    let sheets = match sheet {
        Some(s) => vec![s.to_string()],
        None => reader::list_sheets(file)?,
    };

    println!("📄 {}", file.display());
    for sheet_name in &sheets {
        let table = reader::load_table(file, Some(sheet_name))?;
        let categories = category_options(&table.headers);

        println!("\nシート: {} ({}行)", sheet_name, table.len());
        println!("  列: {}", table.headers.join(", "));
        let names = name_candidates(&table.headers);
        if names.is_empty() {
            println!("  名前列候補: (なし)");
        } else {
            println!("  名前列候補: {}", names.join(", "));
        }
        match categories.advisory {
            Some(Advisory::NoCategoryColumn) => println!("  分類列候補: (なし)"),
            None => println!("  分類列候補: {}", categories.choices.join(", ")),
        }
    }

    Ok(())
}
