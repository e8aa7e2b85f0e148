//! Static content of the UK visa calculator user guide.
//!
//! The outline is authoring-time configuration: an ordered list of headings
//! with their bullet and screenshot-placeholder items.  [`build_guide`]
//! performs the single forward pass that turns it into a populated
//! [`GuideBuilder`].

use crate::builder::GuideBuilder;
use crate::error::GuideError;
use crate::model::{HorizontalAlignment, OutlineSection, OutlineSpec, OutputConfig};

/// Title block text; the embedded line break separates company and document
/// name.
pub const GUIDE_TITLE: &str =
    "KC Overseas Education Pvt Ltd\nUK Visa Funds & IHS Calculator – User Guide";

/// Font size of the title block, in points.
pub const GUIDE_TITLE_FONT_SIZE: u8 = 16;

/// Version and audience paragraph shown below the title.
pub const GUIDE_METADATA: &str = "Version: v2.3.0\nAudience: Counselors / Operations / Admissions";

/// Returns the full ten-section outline of the user guide.
pub fn user_guide_outline() -> OutlineSpec {
    OutlineSpec::new().with_sections([
        OutlineSection::new("1) Purpose")
            .with_bullet(
                "Calculate IHS, funds required, funds available, and generate client-ready PDFs.",
            )
            .with_bullet(
                "Uses cached data for fast response and daily student data sync from Google Sheets.",
            ),
        OutlineSection::new("2) Access & Security")
            .with_bullet("Open the app URL shared internally.")
            .with_bullet("Enter the access code when prompted (do not share externally).")
            .with_bullet(
                "Access code is required for all API calls; unauthorized users are blocked.",
            ),
        OutlineSection::new("3) Quick Use – IHS Calculation")
            .with_bullet("Go to Tab 1 (Course & application).")
            .with_bullet("Enter Course start and end dates.")
            .with_bullet("IHS total appears immediately in the IHS box.")
            .with_placeholder("[Insert Screenshot: IHS quick calculation box]"),
        OutlineSection::new("4) Quick Use – Funds Required")
            .with_bullet("Enter Tuition total, Tuition paid, Scholarship, Dependants, Buffer.")
            .with_bullet("Set Visa application date (recommended for 31-day checks).")
            .with_bullet("Results show Funds Required in GBP and display currency.")
            .with_placeholder("[Insert Screenshot: Fees & funds input section]"),
        OutlineSection::new("5) Daily Workflow (Full Calculation)")
            .with_bullet("Search student by acknowledgement number or name.")
            .with_bullet("Select counselor and verify auto-filled fields.")
            .with_bullet("Add funds rows (bank/FD/loan) with dates and amounts.")
            .with_bullet("Go to Results and review eligibility + warnings.")
            .with_bullet("Download PDF when ready.")
            .with_placeholder("[Insert Screenshot: Funds available breakdown + results]"),
        OutlineSection::new("6) Currency Handling")
            .with_bullet("Display currency can be changed for client communication.")
            .with_bullet("If FX is unavailable, the system falls back to GBP-only display.")
            .with_bullet("Manual FX overrides can be used if live FX fails.")
            .with_placeholder("[Insert Screenshot: FX settings panel]"),
        OutlineSection::new("7) Data Updates")
            .with_bullet("Students: Auto-synced daily from Google Sheets (11:00 AM IST).")
            .with_bullet("Counselors: Read from local CSV (update as required).")
            .with_bullet(
                "Country currency: Read from local JSON (update when new countries appear).",
            )
            .with_bullet("UKVI config: Update if GOV.UK policy changes."),
        OutlineSection::new("8) Sync Status (Visibility)")
            .with_bullet("The app shows the last successful student data update time in IST.")
            .with_bullet("If a sync fails, cached data remains available (no data loss)."),
        OutlineSection::new("9) Troubleshooting")
            .with_bullet("FX error or missing conversions: retry or use manual FX override.")
            .with_bullet("No student results: confirm sheet is published and synced.")
            .with_bullet("PDF issues: re-check dates and required fields, then regenerate."),
        OutlineSection::new("10) Support")
            .with_bullet("For issues or access: Contact the internal operations lead."),
    ])
}

/// Assembles the complete guide for the given output configuration.
///
/// The pass is strictly linear: optional logo, title, metadata, then every
/// outline section in order.  The returned builder has not been rendered
/// yet; callers decide whether to serialize to bytes or straight to a file.
pub fn build_guide(config: &OutputConfig) -> Result<GuideBuilder, GuideError> {
    let mut builder = GuideBuilder::new();

    if let Some(logo) = config.logo() {
        builder.add_logo(logo, config.logo_width_mm())?;
    }

    builder.add_title(
        GUIDE_TITLE,
        true,
        GUIDE_TITLE_FONT_SIZE,
        HorizontalAlignment::Left,
    )?;
    builder.add_metadata(GUIDE_METADATA)?;
    builder.add_outline(&user_guide_outline())?;

    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::user_guide_outline;
    use crate::model::ItemKind;

    #[test]
    fn outline_has_ten_sections_in_order() {
        let outline = user_guide_outline();
        assert_eq!(outline.sections().len(), 10);
        assert_eq!(outline.sections()[0].heading(), "1) Purpose");
        assert_eq!(outline.sections()[9].heading(), "10) Support");
    }

    #[test]
    fn screenshot_sections_end_with_a_placeholder() {
        let outline = user_guide_outline();
        for index in [2, 3, 4, 5] {
            let section = &outline.sections()[index];
            let last = section.items().last().expect("section has items");
            assert_eq!(
                last.kind(),
                ItemKind::Placeholder,
                "section {} should end with a placeholder",
                section.heading()
            );
        }
    }
}
