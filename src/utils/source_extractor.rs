//! Canonical source name extraction from job posting URLs.
//!
//! Sync tags every ingested record with the platform it came from so that
//! filtering and analytics group by a stable name instead of raw hostnames.

use std::sync::LazyLock;

/// Ordered lookup table. Earlier entries win, so specific board and company
/// domains must come before the generic `careers.`/`jobs.` patterns.
static SOURCE_PATTERNS: LazyLock<Vec<(&'static [&'static str], &'static str)>> =
    LazyLock::new(|| {
        vec![
            // Job boards
            (&["linkedin.com"], "LinkedIn"),
            (&["shine.com"], "Shine"),
            (&["glassdoor"], "Glassdoor"),
            (&["jooble.org"], "Jooble"),
            (&["instahyre.com"], "Instahyre"),
            (&["indeed.com"], "Indeed"),
            (&["foundit.in", "monsterindia"], "Foundit"),
            (&["hirist.tech", "hirist.com"], "Hirist"),
            (&["timesjobs.com"], "TimesJobs"),
            (&["talent.com"], "Talent.com"),
            (&["adzuna.in"], "Adzuna"),
            (&["internshala.com"], "Internshala"),
            (&["naukri.com"], "Naukri"),
            (&["cutshort.io"], "Cutshort"),
            (&["wellfound.com", "angel.co"], "Wellfound"),
            (&["apnacircle.com"], "Apna Circle"),
            // Company career sites
            (&["jobs.barclays"], "Barclays"),
            (&["careers.cognizant.com"], "Cognizant"),
            (&["jobs.siemens.com"], "Siemens"),
            (&["jobs.citi.com"], "Citi"),
            (&["capgemini.com"], "Capgemini"),
            (&["careers.blackrock.com"], "BlackRock"),
            (&["careers.mastercard.com"], "Mastercard"),
            (&["careers.united.com"], "United Airlines"),
            (&["careers.oracle.com"], "Oracle"),
            (&["jobs.mercedes-benz.com"], "Mercedes-Benz"),
            (&["telstra.wd3.myworkdayjobs.com"], "Telstra"),
            (&["careers.hpe.com"], "HPE"),
            (&["jobs-ups.com"], "UPS"),
            (&["synechron.wd1.myworkdayjobs.com"], "Synechron"),
            (&["group.bnpparibas"], "BNP Paribas"),
            (&["careers.ibm.com", "ibm.com/jobs"], "IBM"),
            // Aggregated results resolved by Google
            (&["google.com/search", "jobs.google.com"], "Google Jobs"),
            // Unrecognized company career pages
            (&["careers.", "/careers/", "jobs.", "/jobs/"], "Company Website"),
        ]
    });

/// Extracts the canonical source/platform name from a job posting URL.
///
/// Matching is case-insensitive substring matching against an ordered table.
/// Never panics and never returns an empty string: a blank URL maps to
/// `"Unknown"` and anything unrecognized to `"Company Website"`.
pub fn extract_source(url: &str) -> &'static str {
    if url.trim().is_empty() {
        return "Unknown";
    }

    let url_lower = url.to_lowercase();

    // Schneider Electric hosts on se.com, too short to match on its own.
    if url_lower.contains("se.com") && url_lower.contains("careers") {
        return "Schneider Electric";
    }

    for (patterns, name) in SOURCE_PATTERNS.iter() {
        if patterns.iter().any(|p| url_lower.contains(p)) {
            return name;
        }
    }

    "Company Website"
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn extracts_known_boards() {
        assert_eq!(
            extract_source("https://www.linkedin.com/jobs/view/3791"),
            "LinkedIn"
        );
        assert_eq!(
            extract_source("https://in.indeed.com/viewjob?jk=abc"),
            "Indeed"
        );
        assert_eq!(
            extract_source("https://www.naukri.com/job-listings-rust-dev"),
            "Naukri"
        );
        assert_eq!(
            extract_source("https://www.timesjobs.com/candidate/job-detail.html"),
            "TimesJobs"
        );
        assert_eq!(
            extract_source("https://www.monsterindia.com/job/1"),
            "Foundit"
        );
        assert_eq!(extract_source("https://angel.co/company/x/jobs"), "Wellfound");
    }

    #[test]
    fn extraction_is_case_insensitive() {
        assert_eq!(
            extract_source("HTTPS://WWW.LINKEDIN.COM/JOBS/VIEW/1"),
            "LinkedIn"
        );
    }

    #[test]
    fn extracts_company_career_sites() {
        assert_eq!(
            extract_source("https://careers.ibm.com/job/21090155"),
            "IBM"
        );
        assert_eq!(
            extract_source("https://www.ibm.com/jobs/21090155"),
            "IBM"
        );
        assert_eq!(
            extract_source("https://jobs.barclays/software-engineer"),
            "Barclays"
        );
        assert_eq!(
            extract_source("https://www.se.com/in/en/about-us/careers/overview.jsp"),
            "Schneider Electric"
        );
        assert_eq!(
            extract_source("https://telstra.wd3.myworkdayjobs.com/en-US/Careers/job/1"),
            "Telstra"
        );
    }

    #[test]
    fn google_jobs_beats_generic_jobs_pattern() {
        // jobs.google.com also contains "jobs." and must not fall into the
        // generic company-website bucket.
        assert_eq!(extract_source("https://jobs.google.com/about"), "Google Jobs");
        assert_eq!(
            extract_source("https://www.google.com/search?q=rust+jobs&ibp=htl;jobs"),
            "Google Jobs"
        );
    }

    #[test]
    fn generic_career_pages_map_to_company_website() {
        assert_eq!(
            extract_source("https://careers.smallstartup.dev/openings/4"),
            "Company Website"
        );
        assert_eq!(
            extract_source("https://smallstartup.dev/jobs/rust-engineer"),
            "Company Website"
        );
    }

    #[test]
    fn fallbacks() {
        assert_eq!(extract_source(""), "Unknown");
        assert_eq!(extract_source("   "), "Unknown");
        assert_eq!(extract_source("https://example.com/about"), "Company Website");
    }

    proptest! {
        #[test]
        fn never_panics_never_empty(url in ".{0,300}") {
            let source = extract_source(&url);
            prop_assert!(!source.is_empty());
        }

        #[test]
        fn blank_is_unknown(ws in "[ \t]{0,10}") {
            prop_assert_eq!(extract_source(&ws), "Unknown");
        }
    }
}
