use taskcast_core::api::{NameResolver, RecipientMap};

pub fn rows(input: &[&[&str]]) -> Vec<Vec<String>> {
    input
        .iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect()
}

pub fn resolver(pairs: &[(&str, &str)]) -> NameResolver {
    let map: RecipientMap = pairs
        .iter()
        .map(|(n, id)| (n.to_string(), id.to_string()))
        .collect();
    NameResolver::new(&map).expect("valid recipient names")
}
