use clap::Parser;
use dialoguer::Confirm;
use ses_board::cli::{parse_width, Cli, Commands, FavoriteAction, SourceArgs};
use ses_board::config::Config;
use ses_board::error::{Result, SesBoardError};
use ses_board::loader::{self, Dataset, Source};
use ses_board::store::StateStore;
use ses_board::{export, render, search};
use ses_board_common::category_facets;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn load(source: &SourceArgs, config: &Config) -> Result<Dataset> {
    let source = Source::resolve(source.source.as_deref(), config);
    tracing::debug!(%source, "取得元");
    loader::load_dataset(&source, config.timeout_seconds).await
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()?;
    let store = StateStore::open(config.data_dir()?);

    match cli.command {
        Commands::Search { source, filter, json, limit, toggle_favorites } => {
            let criteria = search::resolve_criteria(&filter, &store)?;
            let dataset = load(&source, &config).await?;
            let mut favorites = store.load_favorites();

            let results = search::run_search(
                &dataset.listings,
                &criteria,
                &filter.sort_state(),
                &favorites,
            );

            if toggle_favorites {
                let added = favorites.toggle_all(results.iter().map(|l| l.id.as_str()));
                store.save_favorites(&favorites)?;
                if added {
                    println!("✔ {}件をお気に入りに追加しました", results.len());
                } else {
                    println!("✔ 表示中のお気に入りを解除しました");
                }
            }

            let shown = match limit {
                Some(n) => &results[..n.min(results.len())],
                None => &results[..],
            };

            if json {
                println!("{}", serde_json::to_string_pretty(shown)?);
            } else {
                let layout = store.load_column_layout();
                print!("{}", render::render_table(shown, &layout, &favorites));
                println!("\n{}", render::render_count(results.len(), dataset.listings.len()));
            }
        }

        Commands::Show { id, source } => {
            let dataset = load(&source, &config).await?;
            let listing = dataset
                .find(&id)
                .ok_or_else(|| SesBoardError::ListingNotFound(id.clone()))?;
            let favorites = store.load_favorites();
            print!("{}", render::render_detail(listing, favorites.contains(&listing.id)));
        }

        Commands::Copy { id, title, source } => {
            let dataset = load(&source, &config).await?;
            let listing = dataset
                .find(&id)
                .ok_or_else(|| SesBoardError::ListingNotFound(id.clone()))?;
            if title {
                println!("{}", listing.title_copy_text());
            } else {
                println!("{}", listing.copy_text);
            }
        }

        Commands::Headers { source } => {
            let dataset = load(&source, &config).await?;
            print!("{}", render::render_header_report(&dataset.report));
            println!(
                "行数: {}（案件名あり: {}）",
                dataset.rows.len(),
                dataset.listings.len()
            );
        }

        Commands::Facets { source } => {
            let dataset = load(&source, &config).await?;
            print!("{}", render::render_facets(&category_facets(&dataset.listings)));
        }

        Commands::Favorite { action } => {
            let mut favorites = store.load_favorites();
            match action {
                FavoriteAction::Add { id } => {
                    favorites.insert(id.clone());
                    store.save_favorites(&favorites)?;
                    println!("✔ お気に入りに追加: {}", id);
                }
                FavoriteAction::Remove { id } => {
                    if favorites.remove(&id) {
                        store.save_favorites(&favorites)?;
                        println!("✔ お気に入りから削除: {}", id);
                    } else {
                        println!("お気に入りに登録されていません: {}", id);
                    }
                }
                FavoriteAction::Toggle { id } => {
                    let added = favorites.toggle(&id);
                    store.save_favorites(&favorites)?;
                    if added {
                        println!("✔ お気に入りに追加: {}", id);
                    } else {
                        println!("✔ お気に入りから削除: {}", id);
                    }
                }
                FavoriteAction::List => {
                    if favorites.is_empty() {
                        println!("お気に入りはありません");
                    }
                    for id in favorites.iter() {
                        println!("★ {}", id);
                    }
                }
                FavoriteAction::Clear => {
                    let count = favorites.len();
                    favorites.clear();
                    store.save_favorites(&favorites)?;
                    println!("✔ お気に入りを{}件削除しました", count);
                }
            }
        }

        Commands::Columns { move_column, width, reset } => {
            if reset {
                store.reset_column_layout()?;
                println!("✔ 列の並び順・幅を初期化しました");
            }

            let mut layout = store.load_column_layout();
            let mut changed = false;

            if let Some(positions) = move_column {
                if let [from, to] = positions[..] {
                    if layout.move_column(from, to) {
                        changed = true;
                    } else {
                        println!("移動できません: {} → {}", from, to);
                    }
                }
            }

            if let Some(values) = width {
                let (id, px) = parse_width(&values).map_err(SesBoardError::Config)?;
                layout.set_width(id, px);
                changed = true;
            }

            if changed {
                store.save_column_layout(&layout)?;
                println!("✔ 列レイアウトを保存しました");
            }

            print!("{}", render::render_columns(&layout));
        }

        Commands::Export { source, filter, output } => {
            println!("📄 ses-board - Excel出力\n");

            println!("[1/2] データを読み込み中...");
            let criteria = search::resolve_criteria(&filter, &store)?;
            let dataset = load(&source, &config).await?;
            let favorites = store.load_favorites();
            let results = search::run_search(
                &dataset.listings,
                &criteria,
                &filter.sort_state(),
                &favorites,
            );
            println!("✔ {}\n", render::render_count(results.len(), dataset.listings.len()));

            println!("[2/2] Excelを生成中...");
            let today = chrono::Local::now().date_naive();
            let output_path = export::resolve_output_path(output.as_deref(), today);
            export::write_excel(&results, &output_path)?;
            println!("✔ Excel出力: {}", output_path.display());

            println!("\n✅ 完了");
        }

        Commands::Reset { yes } => {
            let confirmed = yes
                || Confirm::new()
                    .with_prompt("お気に入り・検索条件・列設定をすべて初期化しますか？")
                    .default(false)
                    .interact()
                    .map_err(|e| SesBoardError::Config(e.to_string()))?;

            if confirmed {
                let removed = store.reset()?;
                println!("✔ 設定を初期化しました（{}件）", removed);
            } else {
                println!("キャンセルしました");
            }
        }

        Commands::Config { set_url, show } => {
            let mut config = config;

            if let Some(url) = set_url {
                config.set_sheet_url(url)?;
                println!("✔ 取得元URLを設定しました");
            }

            if show {
                println!("設定:");
                println!("  取得元URL: {}", config.sheet_url());
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  保存先: {}", store.dir().display());
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
