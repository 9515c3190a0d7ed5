//! Excel生成（共通ライブラリ）
//!
//! 絞り込み済みの案件一覧を1シートの表として書き出す。
//! 列と見出しの対応は `EXPORT_COLUMNS` で固定。

use crate::error::{Error, Result};
use crate::mapper::ListingField;
use crate::types::Listing;
use rust_xlsxwriter::*;

/// シート名
pub const SHEET_NAME: &str = "案件一覧";

/// 出力列定義
pub struct ExportColumn {
    pub field: ListingField,
    pub label: &'static str,
    /// 列幅（px）
    pub width: u32,
}

pub const EXPORT_COLUMNS: &[ExportColumn] = &[
    ExportColumn {
        field: ListingField::Category,
        label: "種別",
        width: 80,
    },
    ExportColumn {
        field: ListingField::Status,
        label: "状態",
        width: 60,
    },
    ExportColumn {
        field: ListingField::Id,
        label: "案件番号",
        width: 90,
    },
    ExportColumn {
        field: ListingField::Title,
        label: "案件名",
        width: 240,
    },
    ExportColumn {
        field: ListingField::Description,
        label: "業務概要",
        width: 320,
    },
    ExportColumn {
        field: ListingField::Skills,
        label: "スキル",
        width: 320,
    },
    ExportColumn {
        field: ListingField::Location,
        label: "場所",
        width: 100,
    },
    ExportColumn {
        field: ListingField::Period,
        label: "期間",
        width: 140,
    },
    ExportColumn {
        field: ListingField::Price,
        label: "単価",
        width: 90,
    },
    ExportColumn {
        field: ListingField::ContractType,
        label: "契約",
        width: 110,
    },
    ExportColumn {
        field: ListingField::ForeignNationalPolicy,
        label: "外国籍",
        width: 80,
    },
    ExportColumn {
        field: ListingField::SubcontractPolicy,
        label: "再委託",
        width: 80,
    },
    ExportColumn {
        field: ListingField::Remarks,
        label: "その他",
        width: 200,
    },
];

fn export_err(context: &str) -> impl Fn(XlsxError) -> Error + '_ {
    move |e| Error::Export(format!("{}: {}", context, e))
}

/// 案件一覧のExcelをバッファに生成
///
/// # Arguments
/// * `listings` - 出力する案件（この順で行になる）
///
/// # Returns
/// xlsxファイルのバイト列
pub fn generate_listing_workbook(listings: &[Listing]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x334155))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xCBD5E1));

    let value_format = Format::new()
        .set_align(FormatAlign::Top)
        .set_text_wrap()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(export_err("シート名設定エラー"))?;

    for (col, column) in EXPORT_COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet
            .set_column_width_pixels(col, column.width)
            .map_err(export_err("列幅設定エラー"))?;
        worksheet
            .write_string_with_format(0, col, column.label, &header_format)
            .map_err(export_err("見出し書き込みエラー"))?;
    }

    for (index, listing) in listings.iter().enumerate() {
        let row = index as u32 + 1;
        for (col, column) in EXPORT_COLUMNS.iter().enumerate() {
            let value = listing.field(column.field);
            worksheet
                .write_string_with_format(row, col as u16, value, &value_format)
                .map_err(export_err("値書き込みエラー"))?;
        }
    }

    worksheet
        .set_freeze_panes(1, 0)
        .map_err(export_err("ウィンドウ枠固定エラー"))?;

    workbook
        .save_to_buffer()
        .map_err(export_err("Excel保存エラー"))
}
