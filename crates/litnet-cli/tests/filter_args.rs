use litnet_cli::filter_args::{FilterArg, build_filter_spec};
use litnet_model::{AnalysisError, FilterCatalog, FilterGroup};

fn catalog() -> FilterCatalog {
    FilterCatalog::from_rows([
        ("Species", "Human"),
        ("Species", "Rodents"),
        ("Route", "Oral"),
        ("Route", "Inhalation"),
    ])
}

fn parse(value: &str) -> FilterArg {
    value.parse().unwrap()
}

#[test]
fn plain_list_is_one_group() {
    assert_eq!(
        parse(" Human, Rodents ,Human"),
        FilterArg::Columns(vec!["Human".to_string(), "Rodents".to_string()])
    );
}

#[test]
fn named_group_is_split_on_equals() {
    assert_eq!(
        parse("Route=Oral"),
        FilterArg::Group {
            name: "Route".to_string(),
            columns: vec!["Oral".to_string()],
        }
    );
}

#[test]
fn empty_selections_are_rejected() {
    assert!("".parse::<FilterArg>().is_err());
    assert!(" , ".parse::<FilterArg>().is_err());
    assert!("Route=".parse::<FilterArg>().is_err());
    assert!("=Oral".parse::<FilterArg>().is_err());
}

#[test]
fn arguments_become_and_groups() {
    let args = vec![parse("Species=Human,Rodents"), parse("Oral")];
    let spec = build_filter_spec(&args, &catalog()).unwrap();
    assert_eq!(
        spec.groups,
        vec![
            FilterGroup::named("Species", vec!["Human".to_string(), "Rodents".to_string()]),
            FilterGroup::new(vec!["Oral".to_string()]),
        ]
    );
}

#[test]
fn named_group_is_checked_against_catalog() {
    let err = build_filter_spec(&[parse("Species=Oral")], &catalog()).unwrap_err();
    assert!(matches!(err, AnalysisError::Configuration { .. }));

    let err = build_filter_spec(&[parse("Dose=High")], &catalog()).unwrap_err();
    assert!(err.to_string().contains("Dose"));
}

#[test]
fn named_group_needs_a_catalog() {
    let err = build_filter_spec(&[parse("Route=Oral")], &FilterCatalog::default()).unwrap_err();
    assert!(err.to_string().contains("--filter-groups"));
}

#[test]
fn no_arguments_is_unrestricted() {
    let spec = build_filter_spec(&[], &catalog()).unwrap();
    assert!(spec.is_unrestricted());
}
