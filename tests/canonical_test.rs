use job_extract::{api_endpoint, canonicalize, classify, JobExtractor, PlatformTag};

const LEVER_POSTING: &str = "https://jobs.lever.co/acme/0b7e1f2a-3c4d-4e5f-8a9b-0c1d2e3f4a5b";

#[test]
fn greenhouse_board_url_is_unchanged() {
    let url = "https://boards.greenhouse.io/acme/jobs/4012345";
    let resolved = canonicalize(url, PlatformTag::Greenhouse);
    assert_eq!(resolved.canonical, url);
    assert_eq!(resolved.original, url);
    assert!(!resolved.was_rewritten);
}

#[test]
fn proxied_gh_jid_is_rewritten_to_greenhouse() {
    let url = "https://careers.acme.com/jobs?gh_jid=12345";
    let resolved = canonicalize(url, classify(url));
    assert!(resolved.canonical.contains("greenhouse.io"));
    assert!(resolved.canonical.contains("12345"));
    assert!(resolved.was_rewritten);
}

#[test]
fn gh_jid_with_board_token_builds_board_url() {
    let url = "https://careers.acme.com/jobs?gh_jid=12345&for=acme";
    let resolved = canonicalize(url, PlatformTag::Greenhouse);
    assert_eq!(resolved.canonical, "https://boards.greenhouse.io/acme/jobs/12345");
}

#[test]
fn blank_gh_jid_leaves_url_unchanged() {
    let url = "https://careers.acme.com/jobs?gh_jid=";
    let resolved = canonicalize(url, PlatformTag::Greenhouse);
    assert_eq!(resolved.canonical, url);
    assert!(!resolved.was_rewritten);
}

#[test]
fn lever_apply_suffix_is_stripped_idempotently() {
    for suffix in ["/apply", "/apply/"] {
        let once = canonicalize(&format!("{LEVER_POSTING}{suffix}"), PlatformTag::Lever);
        assert_eq!(once.canonical, LEVER_POSTING);
        assert!(once.was_rewritten);

        let twice = canonicalize(&once.canonical, PlatformTag::Lever);
        assert_eq!(twice.canonical, once.canonical);
        assert!(!twice.was_rewritten);
    }
}

#[test]
fn lever_url_without_apply_is_unchanged() {
    let resolved = canonicalize(LEVER_POSTING, PlatformTag::Lever);
    assert_eq!(resolved.canonical, LEVER_POSTING);
    assert!(!resolved.was_rewritten);
}

#[test]
fn workday_and_generic_are_never_rewritten() {
    let workday = "https://acme.wd5.myworkdayjobs.com/External/job/Berlin/Engineer_R1?source=li";
    assert!(!canonicalize(workday, PlatformTag::Workday).was_rewritten);

    let generic = "https://example.com/careers/42/apply";
    assert!(!canonicalize(generic, PlatformTag::Generic).was_rewritten);
}

#[test]
fn malformed_urls_are_returned_unchanged() {
    for platform in [PlatformTag::Greenhouse, PlatformTag::Lever] {
        let resolved = canonicalize("http://[::1", platform);
        assert_eq!(resolved.canonical, "http://[::1");
        assert!(!resolved.was_rewritten);
    }
}

#[test]
fn lever_api_endpoint() {
    assert_eq!(
        api_endpoint(&format!("{LEVER_POSTING}/apply"), PlatformTag::Lever).as_deref(),
        Some("https://api.lever.co/v0/postings/acme/0b7e1f2a-3c4d-4e5f-8a9b-0c1d2e3f4a5b")
    );
    assert_eq!(api_endpoint("https://boards.greenhouse.io/acme/jobs/1", PlatformTag::Greenhouse), None);
}

#[test]
fn extractor_resolve_combines_both_steps() {
    let (platform, resolved) = JobExtractor::default().resolve(&format!("{LEVER_POSTING}/apply"));
    assert_eq!(platform, PlatformTag::Lever);
    assert_eq!(resolved.canonical, LEVER_POSTING);
}
