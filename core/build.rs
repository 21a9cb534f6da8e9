use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Expansion column values, in tier order (tier 1 first)
const EXPANSIONS: [(&str, &str); 3] = [
    ("HeartOfThorns", "HEART_OF_THORNS_SPECIALIZATIONS"),
    ("PathOfFire", "PATH_OF_FIRE_SPECIALIZATIONS"),
    ("EndOfDragons", "END_OF_DRAGONS_SPECIALIZATIONS"),
];

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    generate_expansion_sets(&out_dir);

    println!("cargo:rerun-if-changed=data/elite_specializations.csv");
}

fn generate_expansion_sets(out_dir: &str) {
    let csv = fs::read_to_string("data/elite_specializations.csv")
        .expect("failed to read elite_specializations.csv");

    // BTreeSet for deterministic output
    let mut sets: [BTreeSet<u8>; 3] = Default::default();
    for line in csv.lines().skip(1) {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 4 {
            continue;
        }
        let id: u8 = match fields[0].trim().parse() {
            Ok(v) => v,
            Err(_) => continue,
        };
        let expansion = fields[3].trim();
        match EXPANSIONS.iter().position(|(name, _)| *name == expansion) {
            Some(tier) => {
                sets[tier].insert(id);
            }
            None => panic!("unknown expansion {expansion:?} for specialization {id}"),
        }
    }

    let path = Path::new(out_dir).join("elite_specializations.rs");
    let mut file = BufWriter::new(fs::File::create(&path).unwrap());

    for ((_, static_name), ids) in EXPANSIONS.iter().zip(&sets) {
        let mut builder = phf_codegen::Set::new();
        for id in ids {
            builder.entry(*id);
        }
        writeln!(file, "pub static {}: phf::Set<u8> = {};", static_name, builder.build()).unwrap();
    }
}
