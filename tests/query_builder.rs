use std::collections::BTreeSet;

use proptest::prelude::*;

use mtgstack::{
    search::query::{CmcRange, FilterState, build_query},
    types::{CardType, Color, ValidationError},
};

fn colors(codes: &str) -> BTreeSet<Color> {
    codes
        .chars()
        .map(|c| Color::from_code(c).expect("color code"))
        .collect()
}

#[test]
fn all_filters_emit_clauses_in_fixed_order() {
    let filters = FilterState {
        card_type: CardType::Creature,
        colors: colors("WU"),
        cmc: CmcRange { min: 2, max: 5 },
        set_code: Some("mh3".to_string()),
    };

    assert_eq!(build_query("", &filters), "t:creature id<=WU cmc>=2 cmc<=5 s:mh3");
}

#[test]
fn base_text_is_trimmed_and_leads() {
    let filters = FilterState {
        card_type: CardType::Instant,
        ..FilterState::default()
    };

    assert_eq!(build_query("  power>3  ", &filters), "power>3 t:instant");
    assert_eq!(build_query("   ", &FilterState::default()), "");
}

#[test]
fn colors_are_joined_in_wubrg_order_regardless_of_selection_order() {
    let filters = FilterState {
        colors: colors("GRW"),
        ..FilterState::default()
    };

    assert_eq!(build_query("", &filters), "id<=WRG");
}

#[test]
fn full_cmc_range_adds_no_clause_and_each_bound_is_independent() {
    let mut filters = FilterState::default();
    assert_eq!(build_query("bolt", &filters), "bolt");

    filters.cmc = CmcRange { min: 3, max: 20 };
    assert_eq!(build_query("bolt", &filters), "bolt cmc>=3");

    filters.cmc = CmcRange { min: 0, max: 0 };
    assert_eq!(build_query("bolt", &filters), "bolt cmc<=0");
}

#[test]
fn any_or_blank_set_code_is_ignored() {
    for set in [None, Some(""), Some("any"), Some("ANY"), Some("  ")] {
        let filters = FilterState {
            set_code: set.map(str::to_string),
            ..FilterState::default()
        };
        assert_eq!(build_query("elf", &filters), "elf", "set {set:?}");
    }
}

#[test]
fn validate_rejects_inverted_and_out_of_bounds_ranges() {
    let inverted = FilterState {
        cmc: CmcRange { min: 6, max: 2 },
        ..FilterState::default()
    };
    assert_eq!(
        inverted.validate(),
        Err(ValidationError::InvertedRange { min: 6, max: 2 })
    );

    let too_high = FilterState {
        cmc: CmcRange { min: 0, max: 21 },
        ..FilterState::default()
    };
    assert_eq!(too_high.validate(), Err(ValidationError::RangeOutOfBounds(21)));

    assert_eq!(FilterState::default().validate(), Ok(()));
    assert!(FilterState::default().is_default());
}

#[test]
fn filter_enums_parse_from_ui_values() {
    assert_eq!("creature".parse::<CardType>(), Ok(CardType::Creature));
    assert_eq!("Any".parse::<CardType>(), Ok(CardType::Any));
    assert!("tribal wizard".parse::<CardType>().is_err());

    assert_eq!("u".parse::<Color>(), Ok(Color::Blue));
    assert_eq!(Color::Black.to_string(), "B");
    assert!("X".parse::<Color>().is_err());
    assert!("WU".parse::<Color>().is_err());
}

proptest! {
    #[test]
    fn default_filters_yield_trimmed_text(text in "[ \t]{0,3}[a-z0-9:<>= ]{0,24}[ \t]{0,3}") {
        prop_assert_eq!(build_query(&text, &FilterState::default()), text.trim());
    }

    #[test]
    fn output_never_has_outer_or_double_spaces(
        text in "[ ]{0,2}[a-z]{0,8}[ ]{0,2}",
        ty in 0usize..8,
        color_mask in 0u8..32,
        min in 0u8..=20,
        max in 0u8..=20,
    ) {
        let types = [
            CardType::Any, CardType::Creature, CardType::Instant, CardType::Sorcery,
            CardType::Artifact, CardType::Enchantment, CardType::Planeswalker, CardType::Land,
        ];
        let filters = FilterState {
            card_type: types[ty],
            colors: Color::ALL
                .iter()
                .enumerate()
                .filter(|(i, _)| color_mask & (1 << i) != 0)
                .map(|(_, c)| *c)
                .collect(),
            cmc: CmcRange { min, max },
            set_code: None,
        };

        let q = build_query(&text, &filters);
        prop_assert_eq!(q.trim(), q.as_str());
        prop_assert!(!q.contains("  "));
    }
}
