// src/pipeline/report.rs

//! Plain-text rendering of jobs, saved lists and statistics.

use std::fmt::Write;

use crate::models::JobAd;
use crate::services::chart::{CHART_TITLE, RegionCount};
use crate::services::classifier::classify_job;

const BAR_WIDTH: usize = 40;

/// One-line summary of a job.
pub fn job_line(job: &JobAd) -> String {
    let mut line = format!("{:<10} {}", job.id, job.headline);

    if let Some(employer) = job.employer_name() {
        let _ = write!(line, " | {}", employer);
    }
    if let Some(place) = job.municipality().or(job.region()) {
        let _ = write!(line, " | {}", place);
    }
    if let Some(branch) = classify_job(job) {
        let _ = write!(line, " [{}]", branch);
    }
    line
}

/// Full description of a single job.
pub fn job_details(job: &JobAd) -> String {
    let mut out = format!("{}\n{}\n", job.headline, "=".repeat(job.headline.chars().count()));

    let fields = [
        ("Id", Some(job.id.as_str())),
        ("Arbetsgivare", job.employer_name()),
        ("Arbetsplats", job.employer_workplace()),
        ("Yrke", job.occupation_label()),
        ("Kommun", job.municipality()),
        ("Län", job.region()),
        ("Publicerad", Some(job.publication_date.as_str()).filter(|d| !d.is_empty())),
        ("Sista ansökningsdag", job.application_deadline.as_deref()),
        ("Lön", job.salary_description.as_deref()),
        (
            "Ansök",
            job.application_details
                .as_ref()
                .and_then(|d| d.url.as_deref().or(d.email.as_deref())),
        ),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            let _ = writeln!(out, "{:<20} {}", format!("{}:", label), value);
        }
    }
    if let Some(branch) = classify_job(job) {
        let _ = writeln!(out, "{:<20} {}", "Bransch:", branch);
    }
    if let Some(text) = job.description_text() {
        let _ = writeln!(out, "\n{}", text.trim());
    }
    out
}

/// The saved and applied lists.
pub fn saved_lists(saved: &[&JobAd], applied: &[&JobAd]) -> String {
    let mut out = String::new();
    write_section(&mut out, "Sparade jobb", "Inga sparade jobb än.", saved);
    out.push('\n');
    write_section(&mut out, "Sökta jobb", "Inga sökta jobb än.", applied);
    out
}

fn write_section(out: &mut String, title: &str, empty: &str, jobs: &[&JobAd]) {
    let _ = writeln!(out, "{}", title);
    if jobs.is_empty() {
        let _ = writeln!(out, "  {}", empty);
        return;
    }
    for job in jobs {
        let _ = writeln!(out, "  {}", job_line(job));
    }
}

/// Horizontal bar chart of jobs per region.
pub fn region_chart(counts: &[RegionCount]) -> String {
    let mut out = format!("{}\n", CHART_TITLE);
    if counts.is_empty() {
        out.push_str("  Inga jobb publicerade.\n");
        return out;
    }

    let max = counts.iter().map(|c| c.count).max().unwrap_or(1).max(1);
    let name_width = counts
        .iter()
        .map(|c| c.region.chars().count())
        .max()
        .unwrap_or(0);

    for entry in counts {
        let bar = (entry.count * BAR_WIDTH).div_ceil(max);
        let padding = name_width - entry.region.chars().count();
        let _ = writeln!(
            out,
            "  {}{} {:>4} {}",
            entry.region,
            " ".repeat(padding),
            entry.count,
            "#".repeat(bar)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employer, Occupation, WorkplaceAddress};

    fn sample_job() -> JobAd {
        JobAd {
            id: "42".into(),
            headline: "Kock till bistro".into(),
            employer: Some(Employer {
                name: Some("Bistro AB".into()),
                ..Employer::default()
            }),
            workplace_address: Some(WorkplaceAddress {
                municipality: Some("Lund".into()),
                region: Some("Skåne län".into()),
                ..WorkplaceAddress::default()
            }),
            occupation: Some(Occupation {
                label: Some("Kock".into()),
            }),
            ..JobAd::default()
        }
    }

    #[test]
    fn test_job_line() {
        let line = job_line(&sample_job());
        assert!(line.starts_with("42"));
        assert!(line.contains("Kock till bistro | Bistro AB | Lund"));
        assert!(line.ends_with("[Service, turism, restaurang]"));
    }

    #[test]
    fn test_job_details_skips_missing_fields() {
        let details = job_details(&sample_job());
        assert!(details.contains("Arbetsgivare:"));
        assert!(details.contains("Län:"));
        assert!(!details.contains("Lön:"));
        assert!(!details.contains("Publicerad:"));
    }

    #[test]
    fn test_saved_lists_empty_messages() {
        let job = sample_job();
        let out = saved_lists(&[&job], &[]);
        assert!(out.contains("Sparade jobb\n  42"));
        assert!(out.contains("Inga sökta jobb än."));
    }

    #[test]
    fn test_region_chart_scales_bars() {
        let counts = vec![
            RegionCount { region: "Skåne län".into(), count: 4 },
            RegionCount { region: "Gotlands län".into(), count: 1 },
        ];
        let chart = region_chart(&counts);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines[0], CHART_TITLE);
        assert!(lines[1].ends_with(&"#".repeat(BAR_WIDTH)));
        assert!(lines[2].ends_with(&"#".repeat(BAR_WIDTH / 4)));
    }

    #[test]
    fn test_region_chart_empty() {
        assert!(region_chart(&[]).contains("Inga jobb publicerade."));
    }
}
