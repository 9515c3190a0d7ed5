//! SES Board Common Library
//!
//! スプレッドシート由来の案件一覧を扱う純粋なコア:
//! 列推定・絞り込み・並び替え・お気に入り・列レイアウト

pub mod types;
pub mod mapper;
pub mod filter;
pub mod sort;
pub mod facets;
pub mod favorites;
pub mod columns;
pub mod state;
pub mod error;
pub mod export;

pub use types::{Listing, RawRow};
pub use mapper::{
    map_row, map_rows, normalize_header, resolve_headers, HeaderReport, ListingField,
    TITLE_PLACEHOLDER,
};
pub use filter::{extract_price, filter_listings, FilterCriteria, PRICE_UNBOUNDED};
pub use sort::{sort_listings, SortState};
pub use facets::{category_facets, CONTRACT_TYPE_FACETS};
pub use favorites::Favorites;
pub use columns::{ColumnId, ColumnLayout, COLUMNS};
pub use state::SearchState;
pub use error::{Error, Result};
