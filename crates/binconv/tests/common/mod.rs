//! Shared record and enumeration fixtures.

#![allow(dead_code)]

use std::collections::HashMap;

use binconv::Binary;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Binary)]
pub struct PocoSimple {
    pub int: i32,
    pub str: Option<String>,
}

impl PocoSimple {
    pub fn new(int: i32, text: Option<&str>) -> Self {
        Self { int, str: text.map(str::to_owned) }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Binary)]
pub struct PocoWithAllPrimitives {
    pub byte: u8,
    pub sbyte: i8,
    pub int16: i16,
    pub uint16: u16,
    pub int32: i32,
    pub uint32: u32,
    pub int64: i64,
    pub uint64: u64,
    pub char: char,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Binary)]
pub enum TestEnum {
    #[default]
    Val0,
    Val1 = 5,
    Val2,
}

#[derive(Debug, Clone, Default, PartialEq, Binary)]
pub struct PocoComplex {
    pub id: i32,
    pub time1: NaiveDateTime,
    pub comment: Option<String>,
    pub sub_record: Option<PocoWithAllPrimitives>,
    pub dec1: Decimal,
    pub real32: f32,
    pub real64: f64,
    pub test_enum: TestEnum,
    pub tuple_n2: Option<(i32, Option<String>)>,
    pub int_list: Option<Vec<i32>>,
    pub sub_record_list: Option<Vec<PocoWithAllPrimitives>>,
    pub int_dict: Option<HashMap<i32, i32>>,
    pub sub_record_dict: Option<HashMap<String, PocoSimple>>,
    pub byte_array: Option<Vec<u8>>,
    pub string_array: Option<Vec<Option<String>>>,
}

/// A singly linked list, recursive through `Option<Box<_>>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Binary)]
pub struct Node {
    pub value: i32,
    pub next: Option<Box<Node>>,
}

impl Node {
    pub fn chain(values: &[i32]) -> Option<Box<Self>> {
        values.iter().rev().fold(None, |next, &value| {
            Some(Box::new(Self { value, next }))
        })
    }
}

pub fn all_primitives(seed: i8) -> PocoWithAllPrimitives {
    PocoWithAllPrimitives {
        byte: seed.unsigned_abs(),
        sbyte: -seed,
        int16: -i16::from(seed) * 100,
        uint16: u16::from(seed.unsigned_abs()) * 100,
        int32: i32::from(seed) * 10_000,
        uint32: u32::from(seed.unsigned_abs()) * 10_000,
        int64: -i64::from(seed) * 1_000_000_007,
        uint64: u64::from(seed.unsigned_abs()) << 40,
        char: char::from(b'a' + seed.unsigned_abs() % 26),
    }
}
