use colored::*;
use folio::commands::{CmdMessage, CmdResult, LightboxView, MessageLevel};
use folio::config::{FolioConfig, CONFIG_KEYS};
use folio::gallery::SectionLayout;
use folio::model::ImageRecord;
use folio::tags::{facet_title, TagIndex};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const PLACE_WIDTH: usize = 24;

pub fn print_result(result: &CmdResult) {
    if let Some(config) = &result.config {
        print_config(config);
    }
    if let Some(tags) = &result.tags {
        print_tags(tags);
    }
    if let Some(view) = &result.lightbox {
        print_lightbox(view);
    }
    if !result.sections.is_empty() {
        print_sections(&result.sections);
    }
    if !result.images.is_empty() {
        print_images(&result.images);
    }
    for value in &result.values {
        println!("{}", value);
    }
    print_messages(&result.messages);
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn caption(record: &ImageRecord) -> String {
    if record.alt_text.trim().is_empty() {
        record.filename()
    } else {
        record.alt_text.clone()
    }
}

fn print_images(images: &[ImageRecord]) {
    for (i, record) in images.iter().enumerate() {
        let idx = format!("{:>4}. ", i + 1);
        let place = format!("{} {}", record.location(), record.year());
        let place = format!("{:>width$}", place, width = PLACE_WIDTH);
        let tagged = if record.metadata.is_some() { "●" } else { " " };

        let available = LINE_WIDTH.saturating_sub(idx.width() + PLACE_WIDTH + 2);
        let title = truncate_to_width(&caption(record), available);
        let padding = available.saturating_sub(title.width());

        println!(
            "{}{}{} {}{}",
            idx.dimmed(),
            title,
            " ".repeat(padding),
            tagged.cyan(),
            place.dimmed()
        );
    }
}

fn print_sections(sections: &[SectionLayout]) {
    for section in sections {
        let layout = &section.layout;
        println!(
            "{} {}",
            section.year.bold(),
            format!(
                "{} columns × {:.0}px, top {:.0}, height {:.0}",
                layout.columns, layout.item_width, section.top, layout.height
            )
            .dimmed()
        );
        for placement in &layout.placements {
            println!(
                "  {} {:>7.0} {:>7.0}  {}",
                format!("col {}", placement.column).yellow(),
                placement.top,
                placement.height,
                placement.id
            );
        }
    }
}

fn print_tags(tags: &TagIndex) {
    for (facet, values) in tags.suggestions() {
        println!("{}", facet_title(facet).bold());
        let tokens: Vec<String> = values.iter().map(|v| format!("{}:{}", facet, v)).collect();
        println!("  {}", tokens.join("  "));
    }
}

fn print_lightbox(view: &LightboxView) {
    let record = &view.record;
    println!(
        "{} {}",
        format!("[{}/{}]", view.position + 1, view.total).yellow(),
        caption(record).bold()
    );
    println!("{}", record.id.dimmed());
    println!("{} {}", record.location(), record.year());

    let Some(meta) = &record.metadata else {
        return;
    };
    if let Some(description) = meta.scene.as_ref().and_then(|s| s.description.as_deref()) {
        println!("--------------------------------");
        println!("{}", description);
    }
    if let Some(style) = meta.photography.as_ref().and_then(|p| p.style.as_deref()) {
        println!("{} {}", "style:".dimmed(), style);
    }
    if !meta.objects.is_empty() {
        let names: Vec<&str> = meta.objects.iter().map(|o| o.name.as_str()).collect();
        println!("{} {}", "objects:".dimmed(), names.join(", "));
    }
}

fn print_config(config: &FolioConfig) {
    for key in CONFIG_KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
    let breakpoints: Vec<String> = config
        .breakpoints
        .iter()
        .map(|bp| format!("≤{}:{}", bp.max_width, bp.columns))
        .collect();
    println!("breakpoints = {}", breakpoints.join(" "));
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_by_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        // wide characters count double
        assert_eq!(truncate_to_width("日本語のタイトル", 7), "日本語…");
    }

    #[test]
    fn caption_falls_back_to_filename() {
        let record = ImageRecord::new("img/2023-05-Rome/My%20Shot.jpg", " ", "2023-05-Rome");
        assert_eq!(caption(&record), "My Shot.jpg");
    }
}
