use std::any::TypeId;

use super::*;
use crate::serializers::time::DateTimeArg;

#[derive(Debug, PartialEq)]
struct Label(&'static str);

impl SerializerArg for Label {}

#[test]
fn arguments_are_keyed_by_type() {
    let settings = SerializerSettings::new()
        .with_argument::<u32>(Label("unsigned"))
        .with_argument::<String>(DateTimeArg::SECONDS);

    assert_eq!(settings.len(), 2);
    assert_eq!(
        settings
            .argument_for(TypeId::of::<u32>())
            .and_then(|argument| argument.downcast_ref::<Label>()),
        Some(&Label("unsigned"))
    );
    assert!(
        settings
            .argument_for(TypeId::of::<String>())
            .is_some_and(|argument| argument.is::<DateTimeArg>())
    );
    assert!(settings.argument_for(TypeId::of::<i32>()).is_none());
}

#[test]
fn insert_replaces_and_remove_clears() {
    let mut settings = SerializerSettings::default();
    assert!(settings.is_empty());

    assert!(settings.insert_argument::<u8>(Label("first")).is_none());

    let replaced = settings.insert_argument::<u8>(Label("second")).unwrap();
    assert_eq!(replaced.downcast_ref::<Label>(), Some(&Label("first")));

    let removed = settings.remove_argument::<u8>().unwrap();
    assert_eq!(removed.downcast_ref::<Label>(), Some(&Label("second")));
    assert!(settings.is_empty());
}

#[test]
fn downcast_to_a_foreign_kind_fails() {
    let settings =
        SerializerSettings::new().with_argument::<u8>(DateTimeArg::DAYS);
    let argument = settings.argument_for(TypeId::of::<u8>()).unwrap();

    assert!(argument.downcast_ref::<Label>().is_none());
    assert_eq!(
        argument.downcast_ref::<DateTimeArg>(),
        Some(&DateTimeArg::DAYS)
    );
}
