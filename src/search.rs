//! 検索の流れ（条件の決定 → 絞り込み → 並び替え）

use crate::cli::FilterArgs;
use crate::error::Result;
use crate::store::StateStore;
use ses_board_common::{
    filter_listings, sort_listings, Favorites, FilterCriteria, Listing, SearchState, SortState,
};

/// 今回の絞り込み条件を決める
///
/// `--restore` なら保存済みの条件を土台にし、指定された引数だけ上書きする。
/// `--save` なら決まった条件を保存する。
pub fn resolve_criteria(args: &FilterArgs, store: &StateStore) -> Result<FilterCriteria> {
    let base = if args.restore {
        store
            .load_search_state()
            .map(|state| state.to_criteria())
            .unwrap_or_default()
    } else {
        FilterCriteria::default()
    };

    let criteria = args.apply_to(base);

    if args.save {
        store.save_search_state(&SearchState::from_criteria(&criteria))?;
        tracing::debug!(?criteria, "検索条件を保存");
    }

    Ok(criteria)
}

/// 絞り込んでから並び替える
pub fn run_search(
    listings: &[Listing],
    criteria: &FilterCriteria,
    sort: &SortState,
    favorites: &Favorites,
) -> Vec<Listing> {
    let mut results = filter_listings(listings, criteria, favorites);
    if sort.is_sorted() {
        sort_listings(&mut results, sort);
        tracing::debug!(key = ?sort.key, ascending = sort.ascending, "並び替え");
    }
    results
}
