use chrono::NaiveDate;

use super::*;

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 18)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

#[test]
fn slugify_basic_names() {
    assert_eq!(slugify("Shrek"), "Shrek");
    assert_eq!(slugify("Mike Wazowski"), "Mike_Wazowski");
    assert_eq!(slugify("Lorde  Farquaad -- o Grande"), "Lorde_Farquaad_o_Grande");
    assert_eq!(slugify("  -Megamente- "), "Megamente");
}

#[test]
fn slugify_keeps_unicode_word_chars() {
    assert_eq!(slugify("João & Ünïcode!"), "João_Ünïcode");
    assert_eq!(slugify("ピカチュウ"), "ピカチュウ");
}

#[test]
fn slugify_drops_punctuation_without_splitting() {
    assert_eq!(slugify("R2-D2 (droid)"), "R2_D2_droid");
    assert_eq!(slugify("a.b.c"), "abc");
    assert_eq!(slugify("../../etc/passwd"), "etcpasswd");
}

#[test]
fn slugify_falls_back_for_empty_results() {
    assert_eq!(slugify(""), SLUG_FALLBACK);
    assert_eq!(slugify("   "), SLUG_FALLBACK);
    assert_eq!(slugify("!!!???"), SLUG_FALLBACK);
    assert_eq!(slugify("___"), SLUG_FALLBACK);
}

#[test]
fn slugify_truncates_by_chars() {
    let long = "é".repeat(100);
    let slug = slugify(&long);
    assert_eq!(slug.chars().count(), SLUG_MAX_CHARS);
}

#[test]
fn slugify_properties_hold_over_samples() {
    let samples = [
        "",
        " ",
        "Shrek",
        "a b c d e f g h i j k l m n o p q r s t u v w x y z",
        "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa bbbb",
        "----",
        "x-_-y",
        "tab\tand\nnewline",
        "emoji 🎉 party",
        "Ça va? Très bien!",
    ];
    for s in samples {
        let slug = slugify(s);
        assert!(!slug.is_empty(), "empty slug for {s:?}");
        assert!(slug.chars().count() <= SLUG_MAX_CHARS, "too long for {s:?}");
        assert!(
            slug.chars().all(|c| c.is_alphanumeric() || c == '_'),
            "bad chars in {slug:?}"
        );
        assert_eq!(slugify(&slug), slug, "not idempotent for {s:?}");
    }
}

#[test]
fn entry_id_formats() {
    let id = EntryId::from_parts(at(20, 5, 9), 0xdead_beef);
    assert_eq!(id.id(), "20251018-200509-deadbeef");
    assert_eq!(id.file_stem(), "20251018-200509_deadbeef");
    assert_eq!(id.meta_file_name(), "20251018-200509_deadbeef.json");
    assert_eq!(
        id.image_file_name("Shrek"),
        "20251018-200509_deadbeef_Shrek.png"
    );
}

#[test]
fn entry_id_suffix_is_zero_padded_hex() {
    let id = EntryId::from_parts(at(0, 0, 0), 0x2a);
    assert!(id.id().ends_with("-0000002a"));
}

#[test]
fn generated_ids_share_timestamp_but_differ_in_suffix() {
    let now = at(12, 0, 0);
    let ids: std::collections::HashSet<String> =
        (0..32).map(|_| EntryId::generate(now).id()).collect();
    // 32 draws from 2^32 colliding is negligible
    assert!(ids.len() > 30);
    assert!(ids.iter().all(|i| i.starts_with("20251018-120000-")));
}
