//! Plain-text rendering of suggestions and results.
//!
//! Every label goes through the [`Localizer`] on every call, so re-rendering
//! after a language switch is all it takes to relabel the output.

use crate::api::{CityCandidate, MuhuratData};
use crate::i18n::Localizer;
use crate::session::DisplayedResult;
use crate::timefmt::{format_time, TimeStyle};
use std::fmt::Write;

pub fn render_suggestions(list: &[CityCandidate], loc: &Localizer<'_>) -> String {
    if list.is_empty() {
        return format!("  {}\n", loc.t("noSuggestions"));
    }
    let mut out = format!("  {}:\n", loc.t("suggestions"));
    for (i, c) in list.iter().enumerate() {
        let _ = writeln!(out, "    {}. {}", i + 1, c);
    }
    out
}

pub fn render_result(result: &DisplayedResult, loc: &Localizer<'_>, style: &TimeStyle) -> String {
    let mut out = String::new();
    let data = &result.data;

    let _ = writeln!(out, "  {} {}", loc.t("resultsFor"), result.city_name);
    let _ = writeln!(out, "  {}: {}", loc.t("date"), result.date.format("%Y-%m-%d"));
    out.push_str("  ──────────────────────────────────────────\n");
    let _ = writeln!(out, "  {}: {}", loc.t("vaara"), loc.label(&data.vaara));
    render_times(&mut out, data, loc, style);

    if !data.tithi.is_empty() {
        section(&mut out, loc, "tithi");
        for item in &data.tithi {
            let name = loc.label(&item.name);
            let paksha = loc.label_opt(item.paksha.as_deref());
            if paksha.is_empty() {
                let _ = writeln!(out, "    {}", name);
            } else {
                let _ = writeln!(out, "    {} ({})", name, paksha);
            }
            window(&mut out, loc, style, &item.start, &item.end);
        }
    }

    if !data.nakshatra.is_empty() {
        section(&mut out, loc, "nakshatra");
        for item in &data.nakshatra {
            let name = loc.label(&item.name);
            let lord = loc.label_opt(item.lord.as_ref().map(|l| l.name.as_str()));
            if lord.is_empty() {
                let _ = writeln!(out, "    {}", name);
            } else {
                let _ = writeln!(out, "    {} ({}: {})", name, loc.t("lord"), lord);
            }
            window(&mut out, loc, style, &item.start, &item.end);
        }
    }

    for (key, periods) in [("karana", &data.karana), ("yoga", &data.yoga)] {
        if periods.is_empty() {
            continue;
        }
        section(&mut out, loc, key);
        for item in periods {
            let _ = writeln!(out, "    {}", loc.label(&item.name));
            window(&mut out, loc, style, &item.start, &item.end);
        }
    }

    out
}

fn render_times(out: &mut String, data: &MuhuratData, loc: &Localizer<'_>, style: &TimeStyle) {
    for (key, raw) in [
        ("sunrise", &data.sunrise),
        ("sunset", &data.sunset),
        ("moonrise", &data.moonrise),
        ("moonset", &data.moonset),
    ] {
        let _ = writeln!(out, "  {}: {}", loc.t(key), format_time(raw, style));
    }
}

fn section(out: &mut String, loc: &Localizer<'_>, key: &str) {
    let _ = writeln!(out, "\n  {}", loc.t(key));
}

fn window(out: &mut String, loc: &Localizer<'_>, style: &TimeStyle, start: &str, end: &str) {
    let _ = writeln!(out, "      {}: {}", loc.t("start"), format_time(start, style));
    let _ = writeln!(out, "      {}: {}", loc.t("end"), format_time(end, style));
}
