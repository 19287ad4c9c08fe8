//! Interview briefing content derived from match results.
//!
//! DESIGN
//! ======
//! Everything here is computed client-side from data the match endpoints
//! already return; no extra requests are made. Functions are pure so the
//! same match always yields the same briefing, and callers control the
//! reference time for staleness checks.

use chrono::NaiveDateTime;

use crate::api::types::Match;

/// A match score at or above this reads as a headline-worthy fit.
pub const TOP_FIT_SCORE: f64 = 85.0;

/// Confidence below this gets flagged as scored-on-thin-data.
pub const LOW_CONFIDENCE: f64 = 40.0;

/// Compensation score below this flags a likely budget mismatch.
pub const COMPENSATION_MISMATCH_SCORE: f64 = 40.0;

/// Days without a recorded interaction before contact details count as
/// stale.
pub const STALE_INTERACTION_DAYS: i64 = 180;

/// Positive points a recruiter can lead with in an interview or pitch.
///
/// Drawn from the match's strengths, the candidate profile when the
/// match embeds one, and any rediscovery signal reasons. Returns an
/// empty list when nothing stands out.
#[must_use]
pub fn talking_points(candidate_match: &Match) -> Vec<String> {
    let mut points = Vec::new();

    if candidate_match.overall_score >= TOP_FIT_SCORE {
        points.push(format!(
            "Top-tier fit: overall match score {:.0} of 100.",
            candidate_match.overall_score
        ));
    }

    if let Some(candidate) = &candidate_match.candidate {
        let mut line = format!(
            "{} brings {} years of experience",
            candidate.name,
            format_years(candidate.experience_years)
        );
        if let Some(seniority) = &candidate.seniority {
            line.push_str(&format!(" at {seniority} level"));
        }
        line.push('.');
        points.push(line);
    }

    points.extend(candidate_match.strengths.iter().take(3).cloned());

    if let Some(candidate) = &candidate_match.candidate {
        if candidate.availability == "immediate" {
            points.push(format!("{} is available to start immediately.", candidate.name));
        }
        if candidate.open_to_remote == "true" {
            points.push("Open to remote work.".to_owned());
        }
    }

    points.extend(
        candidate_match
            .rediscovery_signals
            .iter()
            .map(|signal| signal.reason.clone()),
    );

    points
}

/// Concerns a recruiter should check before reaching out.
///
/// Drawn from the match's weaknesses, scoring confidence, and profile
/// freshness. Returns an empty list when nothing needs flagging.
#[must_use]
pub fn risk_indicators(candidate_match: &Match, as_of: NaiveDateTime) -> Vec<String> {
    let mut risks: Vec<String> = candidate_match.weaknesses.clone();

    if candidate_match.confidence < LOW_CONFIDENCE {
        risks.push(format!(
            "Low scoring confidence ({:.0} of 100): the profile is too sparse to score reliably.",
            candidate_match.confidence
        ));
    }

    if let Some(candidate) = &candidate_match.candidate {
        if candidate.current_status != "available" {
            risks.push(format!(
                "Current status is \"{}\"; they may not be open to a move.",
                candidate.current_status
            ));
        }

        match candidate.last_interaction {
            None => risks.push("No interactions on record; contact details may be stale.".to_owned()),
            Some(last) => {
                let days = (as_of - last).num_days();
                if days > STALE_INTERACTION_DAYS {
                    risks.push(format!(
                        "Last interaction was about {} months ago; contact details may be stale.",
                        days / 30
                    ));
                }
            }
        }

        if let Some(expectation) = candidate.salary_expectation {
            if candidate_match.compensation_score < COMPENSATION_MISMATCH_SCORE {
                risks.push(format!(
                    "Salary expectation of {:.0} {} may sit above the role's band.",
                    expectation, candidate.salary_currency
                ));
            }
        }
    }

    risks
}

/// Render a year count without a trailing `.0` for whole numbers.
fn format_years(years: f64) -> String {
    if years.fract() == 0.0 {
        format!("{years:.0}")
    } else {
        format!("{years:.1}")
    }
}

#[cfg(test)]
#[path = "briefing_test.rs"]
mod tests;
