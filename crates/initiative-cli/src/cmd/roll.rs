use crate::output::print_json;
use anyhow::Context;
use initiative_core::dice;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn run(expr: &str, seed: Option<u64>, json: bool) -> anyhow::Result<()> {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let roll =
        dice::evaluate(expr, &mut rng).with_context(|| format!("cannot roll '{expr}'"))?;

    if json {
        print_json(&serde_json::json!({
            "expr": expr,
            "total": roll.total,
            "terms": roll.terms,
        }))?;
    } else {
        println!("{roll}");
    }
    Ok(())
}
