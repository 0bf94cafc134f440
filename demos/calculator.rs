use log::debug;
use mixed_fractions::{Fraction, FractionError, MixedNumber};

use std::{env, error::Error, process};

fn evaluate(expression: &str) -> Result<MixedNumber, Box<dyn Error>> {
    for &op in &[" + ", " - ", " * ", " / "] {
        if let Some((lhs, rhs)) = expression.split_once(op) {
            let lhs: MixedNumber = lhs.parse()?;
            let rhs: MixedNumber = rhs.parse()?;
            debug!("{:?} {} {:?}", lhs, op.trim(), rhs);

            let result = match op.trim() {
                "+" => lhs.checked_add(rhs),
                "-" => lhs.checked_sub(rhs),
                "*" => lhs.checked_mul(rhs),
                _ => lhs.checked_div(rhs)
            }?;
            return Ok(result);
        }
    }
    Err(format!("expected <lhs> <op> <rhs>, got {:?}", expression).into())
}

fn showcase() -> Result<(), FractionError> {
    println!("Fractions:");
    let reduced = Fraction::new(6, 8)?;
    println!("  6/8 reduces to {}", reduced);
    println!("  1/3 + 1/4 = {}", Fraction::new(1, 3)? + Fraction::new(1, 4)?);
    println!("  3/4 * -2/3 = {}", Fraction::new(3, 4)? * Fraction::new(-2, 3)?);
    println!("  reciprocal of -2/5 = {}", Fraction::new(-2, 5)?.reciprocal()?);
    println!("  7/8 as a decimal = {}", Fraction::new(7, 8)?.decimal());
    match Fraction::new(2, 3)?.checked_div(Fraction::ZERO) {
        Ok(value) => println!("  2/3 / 0 = {}", value),
        Err(err) => println!("  2/3 / 0 fails: {}", err)
    }
    println!();

    println!("Mixed numbers:");
    println!("  1 5/3 normalizes to {}", MixedNumber::new(1, 5, 3)?);
    println!("  2 1/2 + 1 1/4 = {}", MixedNumber::new(2, 1, 2)? + MixedNumber::new(1, 1, 4)?);
    println!("  7/4 parses as {}", MixedNumber::parse("7/4")?);
    println!("  3 1/3 - 4 5/6 = {}", MixedNumber::new(3, 1, 3)? - MixedNumber::new(4, 5, 6)?);
    println!("  2 1/2 as a fraction = {}", MixedNumber::new(2, 1, 2)?.to_improper_fraction());
    println!("  \"oops\" parses as {}", MixedNumber::try_parse("oops").unwrap_or_default());
    Ok(())
}

fn main() {
    env_logger::init();

    let expressions: Vec<String> = env::args().skip(1).collect();
    if expressions.is_empty() {
        if let Err(err) = showcase() {
            eprintln!("error: {}", err);
            process::exit(1);
        }
        return;
    }

    for expression in &expressions {
        match evaluate(expression) {
            Ok(result) => println!("{} = {}", expression, result),
            Err(err) => {
                eprintln!("{}: {}", expression, err);
                process::exit(1);
            }
        }
    }
}
