//! Default human-readable value rendering.
//!
//! Diff lines and `Difference:` diagnostics embed these strings verbatim, so
//! the format is part of the engine's contract: shortest round-trip floats
//! with exponent form outside `[1e-4, 1e21)`, space-joined containers, and
//! `<nil>` for the nil value.

use crate::value::Value;

/// Renders a value the way the host's default formatter would.
pub fn render(v: &Value) -> String {
    match v {
        Value::Nil => "<nil>".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(_, n) => n.to_string(),
        Value::Uint(_, n) => n.to_string(),
        Value::F32(f) => render_f32(*f),
        Value::F64(f) => render_f64(*f),
        Value::Str(s) => s.clone(),
        Value::Bytes(b) => {
            let parts: Vec<String> = b.iter().map(|x| x.to_string()).collect();
            format!("[{}]", parts.join(" "))
        }
        Value::Struct(s) => {
            let parts: Vec<String> = s.fields.iter().map(|(_, v)| render(v)).collect();
            format!("{{{}}}", parts.join(" "))
        }
        Value::Ptr(target) => format!("&{}", render(target)),
        Value::Seq(items) => {
            let parts: Vec<String> = items.iter().map(render).collect();
            format!("[{}]", parts.join(" "))
        }
        Value::Map(pairs) => {
            let parts: Vec<String> =
                pairs.iter().map(|(k, v)| format!("{}:{}", render(k), render(v))).collect();
            format!("map[{}]", parts.join(" "))
        }
        Value::Chan(_) => "chan".to_string(),
        Value::Func(_) => "func()".to_string(),
        Value::Error(e) => e.message().to_string(),
        Value::Iface(i) => i.name().to_string(),
    }
}

/// Textual form used by substring containment and regex checks: string-like
/// values verbatim, error messages, everything else via [`render`].
pub fn text_form(v: &Value) -> String {
    match v {
        Value::Error(e) => e.message().to_string(),
        _ => v.text().unwrap_or_else(|| render(v)),
    }
}

pub fn render_f64(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    shortest_float(format!("{v}"), format!("{v:e}"))
}

pub fn render_f32(v: f32) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    shortest_float(format!("{v}"), format!("{v:e}"))
}

// Decides between the plain and exponent forms the way the host's default
// float formatter does: exponent form when the decimal exponent is < -4 or
// >= 21, with an explicit sign and at least two exponent digits.
fn shortest_float(plain: String, exp_form: String) -> String {
    let Some(epos) = exp_form.rfind('e') else {
        return plain;
    };
    let mantissa = &exp_form[..epos];
    let exp: i32 = match exp_form[epos + 1..].parse() {
        Ok(e) => e,
        Err(_) => return plain,
    };
    if exp < -4 || exp >= 21 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.abs())
    } else {
        plain
    }
}
