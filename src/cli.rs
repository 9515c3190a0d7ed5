use clap::{Args, Parser, Subcommand};
use ses_board_common::{ColumnId, FilterCriteria, ListingField, SortState, PRICE_UNBOUNDED};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ses-board")]
#[command(about = "SES案件一覧の検索・絞り込みツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 取得元の指定（省略時は設定のURL）
#[derive(Args, Clone, Debug, Default)]
pub struct SourceArgs {
    /// CSVのURLまたはローカルファイル
    #[arg(long)]
    pub source: Option<String>,
}

/// 絞り込み条件
#[derive(Args, Clone, Debug)]
pub struct FilterArgs {
    /// フリーワード（空白区切りでAND）
    #[arg(short, long)]
    pub query: Option<String>,

    /// 種別（複数指定はOR）
    #[arg(short, long = "category")]
    pub categories: Vec<String>,

    /// 契約形態（複数指定はOR、部分一致）
    #[arg(short = 't', long = "contract-type")]
    pub contract_types: Vec<String>,

    /// 単価の下限（万円）
    #[arg(long)]
    pub min_price: Option<u32>,

    /// 単価の上限（万円、999で上限なし）
    #[arg(long)]
    pub max_price: Option<u32>,

    /// お気に入りのみ
    #[arg(long)]
    pub favorites: bool,

    /// お気に入りのみを解除（復元した条件にも適用）
    #[arg(long, conflicts_with = "favorites")]
    pub no_favorites: bool,

    /// 種別・契約形態の指定を解除してから適用
    #[arg(long)]
    pub clear_filters: bool,

    /// 並び替えキー（例: price, -price で降順）
    #[arg(long, allow_hyphen_values = true)]
    pub sort: Option<SortArg>,

    /// 前回保存した検索条件を復元してから適用
    #[arg(long)]
    pub restore: bool,

    /// 今回の検索条件を保存
    #[arg(long)]
    pub save: bool,
}

impl FilterArgs {
    /// 引数を条件に重ねる（指定されたものだけ上書き）
    pub fn apply_to(&self, mut criteria: FilterCriteria) -> FilterCriteria {
        if self.clear_filters {
            criteria.categories.clear();
            criteria.contract_types.clear();
        }
        if let Some(query) = &self.query {
            criteria.query = query.trim().to_string();
        }
        if !self.categories.is_empty() {
            criteria.categories = self.categories.clone();
        }
        if !self.contract_types.is_empty() {
            criteria.contract_types = self.contract_types.clone();
        }
        if let Some(min) = self.min_price {
            criteria.min_price = min;
        }
        if let Some(max) = self.max_price {
            criteria.max_price = max.min(PRICE_UNBOUNDED);
        }
        if self.favorites {
            criteria.favorites_only = true;
        }
        if self.no_favorites {
            criteria.favorites_only = false;
        }
        criteria
    }

    pub fn sort_state(&self) -> SortState {
        self.sort.map(|s| s.0).unwrap_or_default()
    }
}

/// 並び替え指定（先頭に `-` で降順）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortArg(pub SortState);

impl std::str::FromStr for SortArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, descending) = match s.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        let field: ListingField = name.parse()?;
        Ok(SortArg(if descending {
            SortState::descending(field)
        } else {
            SortState::ascending(field)
        }))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// 案件を検索して一覧表示
    Search {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// JSONで出力
        #[arg(long)]
        json: bool,

        /// 表示件数の上限
        #[arg(long)]
        limit: Option<usize>,

        /// 表示中の案件のお気に入りを一括切り替え
        #[arg(long)]
        toggle_favorites: bool,
    },

    /// 案件の詳細を表示
    Show {
        /// 案件番号
        #[arg(required = true)]
        id: String,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// コピー用テキストを出力
    Copy {
        /// 案件番号
        #[arg(required = true)]
        id: String,

        /// 「番号｜案件名」を出力
        #[arg(long)]
        title: bool,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// 列の推定結果を表示
    Headers {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// 絞り込み候補（種別・契約形態）を表示
    Facets {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// お気に入り管理
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },

    /// 列の並び順・幅
    Columns {
        /// 列を移動（移動元 移動先、0始まり）
        #[arg(long = "move", num_args = 2, value_names = ["FROM", "TO"])]
        move_column: Option<Vec<usize>>,

        /// 列幅を設定（列ID 幅px）
        #[arg(long, num_args = 2, value_names = ["ID", "PX"])]
        width: Option<Vec<String>>,

        /// 並び順・幅を初期化
        #[arg(long)]
        reset: bool,
    },

    /// 絞り込み結果をExcelに出力
    Export {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 保存した設定（お気に入り・検索条件・列）をすべて初期化
    Reset {
        /// 確認しない
        #[arg(short, long)]
        yes: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 取得元URLを設定
        #[arg(long)]
        set_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum FavoriteAction {
    /// 追加
    Add { id: String },
    /// 削除
    Remove { id: String },
    /// 切り替え
    Toggle { id: String },
    /// 一覧
    List,
    /// 全削除
    Clear,
}

/// `--width` の引数を解釈
pub fn parse_width(values: &[String]) -> Result<(ColumnId, u32), String> {
    match values {
        [id, px] => {
            let id: ColumnId = id.parse()?;
            let px: u32 = px
                .parse()
                .map_err(|_| format!("幅は数値で指定してください: {}", px))?;
            Ok((id, px))
        }
        _ => Err("列IDと幅を指定してください".to_string()),
    }
}
