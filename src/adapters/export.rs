use crate::domain::model::CourseRecord;
use crate::utils::error::Result;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};

pub const SHEET_NAME: &str = "Math 31A Prereq Courses";

pub const COLUMNS: [&str; 5] = ["subject_area", "course_number", "title", "description", "level"];

const COLUMN_WIDTHS: [f64; 5] = [14.0, 12.0, 45.0, 90.0, 16.0];
const DESCRIPTION_COLUMN: u16 = 3;

/// Renders the records as an `.xlsx` workbook held in memory.
pub fn render_workbook(records: &[CourseRecord]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xD9E1F2))
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Top);
    let cell = Format::new().set_align(FormatAlign::Top);
    let wrapped = Format::new().set_text_wrap().set_align(FormatAlign::Top);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, (name, width)) in COLUMNS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *name, &header)?;
        worksheet.set_column_width(col, width)?;
    }

    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 1;
        for (col, value) in record.to_row().into_iter().enumerate() {
            let col = col as u16;
            let format = if col == DESCRIPTION_COLUMN { &wrapped } else { &cell };
            worksheet.write_string_with_format(row, col, value, format)?;
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    worksheet.autofilter(0, 0, records.len() as u32, COLUMNS.len() as u16 - 1)?;

    Ok(workbook.save_to_buffer()?)
}

/// Renders the records as CSV with a header row and standard quoting.
pub fn render_csv(records: &[CourseRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for record in records {
        writer.write_record(record.to_row())?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()).into())
}
