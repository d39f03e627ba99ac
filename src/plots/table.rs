//! Table: selected record fields laid out as a grid of text cells.

use crate::chart::{Chart, ChartKind, Frame};
use crate::color::Rgba;
use crate::data::Dataset;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::render::{Mark, Scene, Shape, SvgSurface, Surface, TextAnchor, TextMark};

const TITLE_Y: f32 = 40.0;
const HEADER_Y: f32 = 60.0;
const BODY_Y: f32 = 100.0;
const LEFT_MARGIN: f32 = 10.0;
const DEFAULT_CELL_WIDTH: f32 = 120.0;

/// Table options.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    variables: Vec<String>,
    headings: Option<Vec<String>>,
    cell_widths: Option<Vec<f32>>,
    cell_height: f32,
    head_backgrd: Rgba,
    head_fill: Rgba,
    cell_backgrd: Rgba,
    cell_fill: Rgba,
    cell_stroke: Rgba,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            variables: Vec::new(),
            headings: None,
            cell_widths: None,
            cell_height: 40.0,
            head_backgrd: Rgba::WHITE,
            head_fill: Rgba::BLACK,
            cell_backgrd: Rgba::WHITE,
            cell_fill: Rgba::BLACK,
            cell_stroke: Rgba::BLACK,
        }
    }
}

impl ChartKind for Table {
    const NAME: &'static str = "table";
}

/// A table.
pub type TableChart<S = SvgSurface> = Chart<Table, S>;

impl<S: Surface> Chart<Table, S> {
    /// Record fields shown as columns, in order.
    pub fn set_variables<I, T>(&mut self, variables: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let variables = variables.into_iter().map(Into::into).collect();
        self.configure(|o| o.variables = variables)
    }

    /// Column headings. Defaults to the variable names.
    pub fn set_headings<I, T>(&mut self, headings: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let headings = headings.into_iter().map(Into::into).collect();
        self.configure(|o| o.headings = Some(headings))
    }

    /// Column widths, one per variable. Defaults to 120 px each.
    pub fn set_cell_widths(&mut self, widths: Vec<f32>) -> &mut Self {
        self.configure(|o| o.cell_widths = Some(widths))
    }

    /// Row height for the header and every body row.
    pub fn set_cell_height(&mut self, height: f32) -> &mut Self {
        self.configure(|o| o.cell_height = height)
    }

    /// Header background.
    pub fn set_head_backgrd(&mut self, color: Rgba) -> &mut Self {
        self.configure(|o| o.head_backgrd = color)
    }

    /// Header text color.
    pub fn set_head_fill(&mut self, color: Rgba) -> &mut Self {
        self.configure(|o| o.head_fill = color)
    }

    /// Body cell background.
    pub fn set_cell_backgrd(&mut self, color: Rgba) -> &mut Self {
        self.configure(|o| o.cell_backgrd = color)
    }

    /// Body text color.
    pub fn set_cell_fill(&mut self, color: Rgba) -> &mut Self {
        self.configure(|o| o.cell_fill = color)
    }

    /// Grid line color.
    pub fn set_cell_stroke(&mut self, color: Rgba) -> &mut Self {
        self.configure(|o| o.cell_stroke = color)
    }

    /// Draw the table. The surface is resized to fit the columns and rows.
    ///
    /// # Errors
    ///
    /// Fails when `variables` is unset, the dataset is not a record array,
    /// or the widths or headings do not match the variables.
    pub fn draw_table(&mut self) -> Result<&mut Self> {
        self.draw_with("draw_table", compose)
    }
}

fn compose(frame: &Frame<'_>, table: &Table, data: &Dataset) -> Result<Scene> {
    if table.variables.is_empty() {
        return Err(Error::MissingOption { option: "variables" });
    }
    let records = data.as_records()?;
    let columns = table.variables.len();

    let widths = table.cell_widths.clone().unwrap_or_else(|| vec![DEFAULT_CELL_WIDTH; columns]);
    if widths.len() != columns {
        return Err(Error::InvalidOption {
            option: "cell_widths",
            value: format!("{} widths", widths.len()),
            expected: format!("{columns} widths"),
        });
    }
    let headings = table.headings.as_deref().unwrap_or(&table.variables);
    if headings.len() != columns {
        return Err(Error::InvalidOption {
            option: "headings",
            value: format!("{} headings", headings.len()),
            expected: format!("{columns} headings"),
        });
    }

    let offsets: Vec<f32> = widths
        .iter()
        .scan(0.0, |sum, w| {
            let at = *sum;
            *sum += w;
            Some(at)
        })
        .collect();
    let ch = table.cell_height;
    let width = widths.iter().sum::<f32>() + LEFT_MARGIN;
    let height = BODY_Y + ch * records.len() as f32;

    let mut scene = Scene::new(width, height, Point::ORIGIN);
    scene.title = frame.titles.main.as_ref().map(|title| {
        TextMark::new(20.0, TITLE_Y, title.clone(), frame.style.text(frame.style.title_size).bold())
    });

    let head_style = frame
        .style
        .text(frame.style.title_size)
        .bold()
        .anchor(TextAnchor::Middle)
        .fill(table.head_fill);
    for (i, heading) in headings.iter().enumerate() {
        scene.marks.push(Mark::new(
            format!("head/{}", table.variables[i]),
            Shape::rect(offsets[i], HEADER_Y, widths[i], ch, table.head_backgrd)
                .stroked(table.cell_stroke, 1.0),
        ));
        scene.labels.push(TextMark::new(
            offsets[i] + widths[i] / 2.0,
            HEADER_Y + ch / 2.0 + 4.0,
            heading.clone(),
            head_style.clone(),
        ));
    }

    let cell_style = frame.style.text(frame.style.label_size).fill(table.cell_fill);
    for (row, record) in records.iter().enumerate() {
        let top = BODY_Y + row as f32 * ch;
        for (i, field) in table.variables.iter().enumerate() {
            scene.marks.push(Mark::new(
                format!("row{row}/{field}"),
                Shape::rect(offsets[i], top, widths[i], ch, table.cell_backgrd)
                    .stroked(table.cell_stroke, 1.0),
            ));
            let text = record.get(field).map(ToString::to_string).unwrap_or_default();
            scene.labels.push(TextMark::new(
                offsets[i] + 5.0,
                top + ch / 2.0 + 4.0,
                text,
                cell_style.clone(),
            ));
        }
    }
    tracing::trace!(rows = records.len(), columns, width, height, "table layout");

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;

    fn people() -> Vec<Record> {
        vec![
            Record::new().with("name", "Ann").with("age", 31.0).with("city", "Oslo"),
            Record::new().with("name", "Bo").with("age", 27.5).with("city", "Lima"),
        ]
    }

    fn drawn(chart: &TableChart) -> &Scene {
        chart.surface().unwrap().scene().unwrap()
    }

    #[test]
    fn test_surface_fits_table() {
        let mut chart = TableChart::new();
        chart.init(SvgSurface::new(), people());
        chart.set_variables(["name", "age"]).draw_table().expect("operation should succeed");

        let surface = chart.surface().unwrap();
        assert_eq!(surface.width(), 250.0);
        assert_eq!(surface.height(), 180.0);
        let scene = drawn(&chart);
        assert_eq!(scene.origin, Point::ORIGIN);
        assert!(scene.transition.is_none());
        assert!(scene.axes.is_empty());
        // header plus two rows of two cells
        assert_eq!(scene.marks.len(), 6);
    }

    #[test]
    fn test_cell_layout_and_text() {
        let mut chart = TableChart::new();
        chart.init(SvgSurface::new(), people());
        chart
            .set_variables(["name", "age"])
            .set_cell_widths(vec![100.0, 60.0])
            .set_cell_height(30.0)
            .draw_table()
            .unwrap();

        let scene = drawn(&chart);
        match scene.mark("row1/age").unwrap().shape {
            Shape::Rect { x, y, width, height, .. } => {
                assert_eq!((x, y, width, height), (100.0, 130.0, 60.0, 30.0));
            }
            _ => panic!("expected rect"),
        }
        let ann = scene.labels.iter().find(|l| l.text == "Ann").unwrap();
        assert_eq!((ann.x, ann.y), (5.0, 119.0));
        assert!(scene.labels.iter().any(|l| l.text == "27.5"));
        assert!(!scene.labels.iter().any(|l| l.text == "Oslo"));
    }

    #[test]
    fn test_headings_and_colors() {
        let mut chart = TableChart::new();
        chart.init(SvgSurface::new(), people());
        chart
            .set_title("People")
            .set_variables(["name", "city"])
            .set_headings(["Name", "City"])
            .set_head_backgrd(Rgba::GRAY)
            .set_head_fill(Rgba::WHITE)
            .draw_table()
            .unwrap();

        let scene = drawn(&chart);
        let title = scene.title.as_ref().unwrap();
        assert_eq!((title.x, title.y), (20.0, 40.0));
        let head = &scene.labels[1];
        assert_eq!(head.text, "City");
        assert_eq!((head.x, head.y), (180.0, 84.0));
        assert_eq!(head.style.fill, Rgba::WHITE);
        assert!(head.style.bold);
        assert_eq!(scene.mark("head/name").unwrap().shape.fill(), Some(Rgba::GRAY));
    }

    #[test]
    fn test_missing_field_is_blank() {
        let mut chart = TableChart::new();
        chart.init(SvgSurface::new(), vec![Record::new().with("name", "Cy")]);
        chart.set_variables(["name", "age"]).draw_table().unwrap();
        let texts: Vec<&str> = drawn(&chart).labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["name", "age", "Cy", ""]);
    }

    #[test]
    fn test_variables_required() {
        let mut chart = TableChart::new();
        chart.init(SvgSurface::new(), people());
        assert!(matches!(chart.draw_table(), Err(Error::MissingOption { option: "variables" })));
    }

    #[test]
    fn test_width_count_must_match() {
        let mut chart = TableChart::new();
        chart.init(SvgSurface::new(), people());
        chart.set_variables(["name", "age"]).set_cell_widths(vec![80.0]);
        assert!(matches!(chart.draw_table(), Err(Error::InvalidOption { option: "cell_widths", .. })));
    }
}
