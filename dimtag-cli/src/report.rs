/// Measurement report and its terminal rendering
use std::io::Write;

use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use dimtag_core::{Axis, TagLayout};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointsReport {
    pub end_one: [f64; 3],
    pub end_two: [f64; 3],
    /// World-space distance between the ends
    pub length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackReport {
    pub quantity: usize,
    pub axis: Axis,
    pub width: f64,
    pub buffer: f64,
    pub offsets: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub fragments: usize,
    pub triangles: usize,
    /// Missing when the first fragment had no usable vertex
    pub endpoints: Option<EndpointsReport>,
    pub tag: Option<TagLayout>,
    pub pack: PackReport,
}

fn heading<W: Write>(writer: &mut W, title: &str) -> std::io::Result<()> {
    writer.queue(SetForegroundColor(Color::Cyan))?;
    writer.queue(Print(format!("{title}\n")))?;
    writer.queue(ResetColor)?;
    Ok(())
}

fn line<W: Write>(writer: &mut W, label: &str, value: String) -> std::io::Result<()> {
    writer.queue(SetForegroundColor(Color::DarkGrey))?;
    writer.queue(Print(format!("  {label:<12}")))?;
    writer.queue(ResetColor)?;
    writer.queue(Print(format!("{value}\n")))?;
    Ok(())
}

fn xyz(p: &[f64; 3]) -> String {
    format!("({:.4}, {:.4}, {:.4})", p[0], p[1], p[2])
}

impl Report {
    pub fn write_text<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        heading(writer, "Element")?;
        line(writer, "fragments", self.fragments.to_string())?;
        line(writer, "triangles", self.triangles.to_string())?;

        heading(writer, "Dimension")?;
        match &self.endpoints {
            Some(ends) => {
                line(writer, "end one", xyz(&ends.end_one))?;
                line(writer, "end two", xyz(&ends.end_two))?;
                line(writer, "length", format!("{:.4}", ends.length))?;
            }
            None => {
                writer.queue(SetForegroundColor(Color::Yellow))?;
                writer.queue(Print("  no usable vertices, tag skipped\n"))?;
                writer.queue(ResetColor)?;
            }
        }
        if let Some(tag) = &self.tag {
            line(writer, "label", format!("{:.1}, {:.1} px", tag.label.x, tag.label.y))?;
            line(writer, "line", format!("{:.1} px at {:.2} deg", tag.line_length, tag.line_angle))?;
        }

        heading(writer, "Pack")?;
        line(writer, "quantity", self.pack.quantity.to_string())?;
        line(writer, "axis", format!("{:?}", self.pack.axis))?;
        line(writer, "width", format!("{:.4}", self.pack.width))?;
        let offsets: Vec<String> = self.pack.offsets.iter().map(|o| format!("{o:.4}")).collect();
        line(writer, "offsets", format!("[{}]", offsets.join(", ")))?;

        writer.flush()
    }
}
