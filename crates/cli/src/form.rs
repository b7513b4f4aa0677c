use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use chrono::NaiveDate;
use wayfarer_core::form::BUDGET_STEP;
use wayfarer_core::{trip_form, FieldControl, FormField, Interest, MealPreference, TripRequest};

/// Walks the trip form field by field. Blank answers take the field's
/// default; unparsable answers are asked again.
pub fn prompt_trip<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    today: NaiveDate,
) -> Result<TripRequest> {
    let form = trip_form();
    writeln!(output, "{}\n{}\n", form.title, form.tagline)?;

    let mut text = |name: &str| -> Result<String> {
        let field = field(&form.fields, name)?;
        ask(input, output, field, |raw| Ok::<_, String>(raw.to_string()))
    };
    let source = text("source")?;
    let destination = text("destination")?;

    let interest = ask(input, output, field(&form.fields, "interest")?, |raw| {
        if raw.is_empty() {
            return Ok(Interest::default());
        }
        raw.parse::<Interest>().map_err(|err| err.to_string())
    })?;

    let budget = ask(input, output, field(&form.fields, "budget")?, |raw| {
        if raw.is_empty() {
            return Ok(0);
        }
        raw.parse::<u64>()
            .map_err(|_| format!("budget must be a whole number (steps of {BUDGET_STEP})"))
    })?;

    let start_date = ask(input, output, field(&form.fields, "start_date")?, |raw| {
        parse_date_or(raw, today)
    })?;
    let end_date = ask(input, output, field(&form.fields, "end_date")?, |raw| {
        parse_date_or(raw, today)
    })?;

    let meal_preference = ask(input, output, field(&form.fields, "meal_preference")?, |raw| {
        if raw.is_empty() {
            return Ok(MealPreference::default());
        }
        raw.parse::<MealPreference>().map_err(|err| err.to_string())
    })?;

    let special = ask(
        input,
        output,
        field(&form.fields, "special_requirements")?,
        |raw| Ok::<_, String>(raw.to_string()),
    )?;

    Ok(TripRequest {
        source,
        destination,
        interest,
        budget,
        start_date,
        end_date,
        meal_preference,
        special_requirements: Some(special),
    })
}

fn field<'a>(fields: &'a [FormField], name: &str) -> Result<&'a FormField> {
    match fields.iter().find(|field| field.name == name) {
        Some(field) => Ok(field),
        None => bail!("form has no `{name}` field"),
    }
}

fn ask<R, W, T, F>(input: &mut R, output: &mut W, field: &FormField, parse: F) -> Result<T>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Result<T, String>,
{
    loop {
        write!(output, "{}{}: ", field.label, hint(&field.control))?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed before the form was complete");
        }

        match parse(line.trim()) {
            Ok(value) => return Ok(value),
            Err(message) => writeln!(output, "  {message}")?,
        }
    }
}

fn hint(control: &FieldControl) -> String {
    match control {
        FieldControl::Text { placeholder } | FieldControl::TextArea { placeholder } => {
            format!(" ({placeholder})")
        }
        FieldControl::Select { options, default } => {
            format!(" [{}] (default {default})", options.join(" / "))
        }
        FieldControl::Number { step, default, .. } => {
            format!(" (step {step}, default {default})")
        }
        FieldControl::Date => " (YYYY-MM-DD, default today)".to_string(),
    }
}

fn parse_date_or(raw: &str, today: NaiveDate) -> Result<NaiveDate, String> {
    if raw.is_empty() {
        return Ok(today);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| format!("`{raw}` is not a YYYY-MM-DD date"))
}
