use proptest::prelude::*;
use struct_tags::{FieldDescriptor, StructDescriptor, TypeDescriptor, extract, walk};

fn arb_key() -> impl Strategy<Value = String> {
    r"[a-z][a-z0-9_]{0,7}".prop_map(|s| s)
}

fn arb_value() -> impl Strategy<Value = String> {
    r"[a-zA-Z0-9 ,;=_\-]{0,16}".prop_map(|s| s)
}

prop_compose! {
    fn arb_field()(
        name in r"[A-Za-z][A-Za-z0-9_]{0,7}",
        exported in any::<bool>(),
        pairs in proptest::collection::vec((arb_key(), arb_value()), 0..4),
    ) -> (FieldDescriptor, Vec<(String, String)>) {
        let tag = pairs
            .iter()
            .map(|(k, v)| format!("{k}:\"{v}\""))
            .collect::<Vec<_>>()
            .join(" ");
        let mut field = FieldDescriptor::new(name, tag);
        field.exported = exported;
        (field, pairs)
    }
}

proptest! {
    #[test]
    fn extracted_values_are_the_quoted_text((field, pairs) in arb_field()) {
        let names: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        let got = extract(&field.tag, names.as_slice());
        prop_assert!(got.is_clean());
        for (key, _) in &pairs {
            let first = pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str());
            prop_assert_eq!(got.tags.get(key), first);
        }
    }

    #[test]
    fn unexported_fields_never_appear(fields in proptest::collection::vec(arb_field(), 0..6)) {
        let mut desc = StructDescriptor::new("Generated");
        for (field, _) in &fields {
            desc = desc.field(field.clone());
        }
        let names: Vec<String> = fields
            .iter()
            .flat_map(|(_, pairs)| pairs.iter().map(|(k, _)| k.clone()))
            .collect();

        let desc = TypeDescriptor::from(desc);
        let parsed = walk(&desc, names.as_slice()).unwrap();
        for (field, _) in &fields {
            let exported_with_name = fields
                .iter()
                .any(|(f, _)| f.exported && f.name == field.name);
            prop_assert_eq!(parsed.contains_key(&*field.name), exported_with_name);
        }

        let again = walk(&desc, names.as_slice()).unwrap();
        prop_assert_eq!(parsed, again);
    }
}
