//! 端末向けの表示整形
//!
//! 列幅はpx指定のため、1文字 = 8px（全角は2文字分）で換算する。

use ses_board_common::{
    ColumnId, ColumnLayout, Favorites, HeaderReport, Listing, ListingField, CONTRACT_TYPE_FACETS,
};

const PX_PER_CELL: u32 = 8;
const MIN_CELLS: usize = 4;
const FAVORITE_MARK: &str = "★";
const NOT_FAVORITE_MARK: &str = "☆";

pub const NO_MATCH_MESSAGE: &str = "条件に一致する案件が見つかりませんでした。";

/// 表示幅（全角を2として数える）
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

fn char_width(c: char) -> usize {
    if c.is_ascii() {
        1
    } else {
        2
    }
}

/// 改行・連続空白を1つの空白にまとめる
fn flatten(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 幅に収まるよう切り詰め、足りなければ空白で埋める
pub fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    let total = display_width(text);

    if total <= width {
        out.push_str(text);
        used = total;
    } else {
        let limit = width.saturating_sub(1);
        for c in text.chars() {
            let w = char_width(c);
            if used + w > limit {
                break;
            }
            out.push(c);
            used += w;
        }
        if width > 0 {
            out.push('…');
            used += 1;
        }
    }

    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

fn cells_for(px: u32) -> usize {
    ((px / PX_PER_CELL) as usize).max(MIN_CELLS)
}

fn cell_text(listing: &Listing, column: ColumnId, favorite: bool) -> String {
    match column {
        ColumnId::Category => join_nonempty(&listing.category, &listing.status, " / "),
        ColumnId::Title => {
            let mark = if favorite { FAVORITE_MARK } else { NOT_FAVORITE_MARK };
            format!("{} {} {}", mark, listing.id, flatten(&listing.title))
        }
        ColumnId::Description => flatten(&listing.description),
        ColumnId::Skills => flatten(&listing.skills),
        ColumnId::Location => flatten(&listing.location),
        ColumnId::Period => flatten(&listing.period),
        ColumnId::Price => flatten(&listing.price),
        ColumnId::Type => flatten(&listing.contract_type),
        ColumnId::Foreign => flatten(&listing.foreign_national_policy),
        ColumnId::Subcontract => flatten(&listing.subcontract_policy),
        ColumnId::Others => flatten(&listing.remarks),
    }
}

fn join_nonempty(a: &str, b: &str, sep: &str) -> String {
    match (a.trim().is_empty(), b.trim().is_empty()) {
        (false, false) => format!("{}{}{}", a.trim(), sep, b.trim()),
        (false, true) => a.trim().to_string(),
        (true, false) => b.trim().to_string(),
        (true, true) => String::new(),
    }
}

/// 一覧表
pub fn render_table(listings: &[Listing], layout: &ColumnLayout, favorites: &Favorites) -> String {
    if listings.is_empty() {
        return format!("{}\n", NO_MATCH_MESSAGE);
    }

    let columns: Vec<(ColumnId, usize)> = layout
        .order()
        .iter()
        .map(|&id| (id, cells_for(layout.width(id))))
        .collect();

    let mut out = String::new();

    // 表示中がすべてお気に入りなら★（一括解除）、それ以外は☆（一括登録）
    let all_favorite = favorites.all_favorite(listings.iter().map(|l| l.id.as_str()));
    let header: Vec<String> = columns
        .iter()
        .map(|&(id, width)| match id {
            ColumnId::Title => {
                let mark = if all_favorite { FAVORITE_MARK } else { NOT_FAVORITE_MARK };
                fit(&format!("{} {}", mark, id.def().label), width)
            }
            _ => fit(id.def().label, width),
        })
        .collect();
    out.push_str(header.join(" │ ").trim_end());
    out.push('\n');

    let rule: Vec<String> = columns.iter().map(|&(_, width)| "─".repeat(width)).collect();
    out.push_str(&rule.join("─┼─"));
    out.push('\n');

    for listing in listings {
        let favorite = favorites.contains(&listing.id);
        let row: Vec<String> = columns
            .iter()
            .map(|&(id, width)| fit(&cell_text(listing, id, favorite), width))
            .collect();
        out.push_str(row.join(" │ ").trim_end());
        out.push('\n');
    }

    out
}

/// 件数表示
pub fn render_count(shown: usize, total: usize) -> String {
    if shown == total {
        format!("{}件", total)
    } else {
        format!("{}件 / 全{}件", shown, total)
    }
}

/// 詳細表示
pub fn render_detail(listing: &Listing, favorite: bool) -> String {
    let mut out = String::new();
    let mark = if favorite { FAVORITE_MARK } else { NOT_FAVORITE_MARK };
    out.push_str(&format!("{} {}｜{}\n", mark, listing.id, listing.title));
    out.push_str(&"─".repeat(40));
    out.push('\n');

    for field in ListingField::ALL {
        if matches!(field, ListingField::Id | ListingField::Title | ListingField::CopyText) {
            continue;
        }
        let value = listing.field(field);
        if value.trim().is_empty() {
            continue;
        }
        push_entry(&mut out, field.label(), value);
    }

    let extra = listing.extra_fields();
    if !extra.is_empty() {
        out.push_str("\n[その他の情報]\n");
        for (header, value) in extra {
            push_entry(&mut out, &flatten(header), value);
        }
    }

    if !listing.copy_text.trim().is_empty() {
        out.push('\n');
        out.push_str(&format!("[{}]\n", ListingField::CopyText.label()));
        out.push_str(listing.copy_text.trim_end());
        out.push('\n');
    }

    out
}

fn push_entry(out: &mut String, label: &str, value: &str) {
    let mut lines = value.lines();
    if let Some(first) = lines.next() {
        out.push_str(&format!("{}: {}\n", label, first));
    }
    for line in lines {
        out.push_str(&format!("    {}\n", line));
    }
}

/// ヘッダー推定の診断表示
pub fn render_header_report(report: &HeaderReport) -> String {
    let mut out = format!("列数: {}\n", report.column_count);

    for resolution in &report.resolutions {
        let status = match resolution.selected() {
            Some(header) if resolution.is_ambiguous() => {
                format!("{} （候補: {}）", header, resolution.matches.join(", "))
            }
            Some(header) => header.to_string(),
            None if resolution.field == ListingField::CopyText
                && report.uses_positional_copy_text() =>
            {
                "R列（位置指定）".to_string()
            }
            None => "（該当なし）".to_string(),
        };
        out.push_str(&format!("  {:<12} {}\n", resolution.field.label(), status));
    }

    if report.is_clean() {
        out.push_str("✔ すべての列を推定できました\n");
    } else {
        let missing = report.missing().len();
        let ambiguous = report.ambiguous().len();
        out.push_str(&format!("⚠ 該当なし: {}件, 複数該当: {}件\n", missing, ambiguous));
    }

    out
}

/// 絞り込み候補の表示
pub fn render_facets(categories: &[String]) -> String {
    let mut out = String::from("種別:\n");
    for category in categories {
        out.push_str(&format!("  - {}\n", category));
    }
    out.push_str("契約形態:\n");
    for contract in CONTRACT_TYPE_FACETS {
        out.push_str(&format!("  - {}\n", contract));
    }
    out
}

/// 列レイアウトの表示
pub fn render_columns(layout: &ColumnLayout) -> String {
    let mut out = String::new();
    for (index, &id) in layout.order().iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}. {:<12} {:>4}px  ({})\n",
            index,
            id.as_str(),
            layout.width(id),
            id.def().label
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ses_board_common::RawRow;

    fn listing(id: &str, title: &str) -> Listing {
        Listing {
            id: id.to_string(),
            title: title.to_string(),
            category: "開発系".to_string(),
            status: "募集中".to_string(),
            price: "65万円".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_display_width() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("案件"), 4);
        assert_eq!(display_width("A案"), 3);
    }

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("案件一覧です", 6), "案件… ");
    }

    #[test]
    fn test_render_table_empty_message() {
        let out = render_table(&[], &ColumnLayout::default(), &Favorites::default());
        assert!(out.contains(NO_MATCH_MESSAGE));
    }

    #[test]
    fn test_render_table_marks_favorites() {
        let listings = vec![listing("P-001", "Java"), listing("P-002", "Go")];
        let favorites: Favorites = ["P-002"].into_iter().collect();
        let out = render_table(&listings, &ColumnLayout::default(), &favorites);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("☆ P-001"));
        assert!(lines[3].contains("★ P-002"));
        assert!(lines[2].starts_with("開発系 /"));
    }

    #[test]
    fn test_render_table_follows_column_order() {
        let mut layout = ColumnLayout::default();
        // 単価列を先頭へ
        let price_index = layout
            .order()
            .iter()
            .position(|&id| id == ColumnId::Price)
            .unwrap();
        layout.move_column(price_index, 0);
        let out = render_table(&[listing("P-001", "Java")], &layout, &Favorites::default());
        assert!(out.lines().next().unwrap().starts_with("単価"));
    }

    #[test]
    fn test_render_table_title_header_shows_bulk_favorite_state() {
        let listings = vec![listing("P-001", "Java"), listing("P-002", "Go")];
        let layout = ColumnLayout::default();

        let some: Favorites = ["P-001"].into_iter().collect();
        let out = render_table(&listings, &layout, &some);
        assert!(out.lines().next().unwrap().contains("☆ 案件名"));

        let all: Favorites = ["P-001", "P-002", "P-999"].into_iter().collect();
        let out = render_table(&listings, &layout, &all);
        assert!(out.lines().next().unwrap().contains("★ 案件名"));
    }

    #[test]
    fn test_render_detail_lists_unmodeled_columns() {
        let mut item = listing("P-1", "Java");
        item.raw = RawRow::from_pairs([
            ("案件番号", "P-1"),
            ("案件名", "Java"),
            ("面談回数", "2回"),
            ("商流", "元請直"),
        ]);
        let out = render_detail(&item, false);
        assert!(out.contains("[その他の情報]"));
        assert!(out.contains("面談回数: 2回"));
        assert!(out.contains("商流: 元請直"));
        assert!(!out.contains("案件番号: P-1"));
    }

    #[test]
    fn test_render_count() {
        assert_eq!(render_count(3, 3), "3件");
        assert_eq!(render_count(1, 3), "1件 / 全3件");
    }

    #[test]
    fn test_render_detail_keeps_lines_and_skips_empty() {
        let mut item = listing("P-001", "Java");
        item.skills = "Java\nSpring".to_string();
        item.copy_text = "PR文".to_string();
        let out = render_detail(&item, true);
        assert!(out.starts_with("★ P-001｜Java"));
        assert!(out.contains("    Spring"));
        assert!(out.contains("PR文"));
        assert!(!out.contains(ListingField::Location.label()));
    }
}
