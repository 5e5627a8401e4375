//! OpenStep (ASCII plist) writer.
//!
//! Dictionary keys stay bare when they can, values are always quoted, so that
//! every `key = "value";` assignment has one textual shape regardless of the
//! characters in the value.

use plist::Value;

/// Write a plist Value in OpenStep format.
pub fn write(value: &Value) -> String {
    let mut output = String::new();
    write_value(&mut output, value, 0);
    output.push('\n');
    output
}

fn write_value(output: &mut String, value: &Value, indent: usize) {
    match value {
        Value::Dictionary(dict) => write_dictionary(output, dict, indent),
        Value::Array(arr) => write_array(output, arr, indent),
        Value::String(s) => write_string(output, s),
        Value::Integer(i) => {
            if let Some(n) = i.as_signed() {
                output.push_str(&n.to_string());
            } else if let Some(n) = i.as_unsigned() {
                output.push_str(&n.to_string());
            }
        }
        Value::Real(f) => output.push_str(&f.to_string()),
        Value::Boolean(b) => output.push_str(if *b { "1" } else { "0" }),
        Value::Date(d) => write_string(output, &d.to_xml_format()),
        Value::Uid(u) => output.push_str(&u.get().to_string()),
        // Manifest scanning never looks at data blobs.
        Value::Data(_) => output.push_str("<>"),
        _ => output.push_str("\"\""),
    }
}

fn push_indent(output: &mut String, indent: usize) {
    for _ in 0..indent {
        output.push('\t');
    }
}

fn write_dictionary(output: &mut String, dict: &plist::Dictionary, indent: usize) {
    output.push_str("{\n");
    for (key, value) in dict.iter() {
        push_indent(output, indent + 1);
        write_key(output, key);
        output.push_str(" = ");
        write_value(output, value, indent + 1);
        output.push_str(";\n");
    }
    push_indent(output, indent);
    output.push('}');
}

fn write_array(output: &mut String, arr: &[Value], indent: usize) {
    output.push_str("(\n");
    for value in arr {
        push_indent(output, indent + 1);
        write_value(output, value, indent + 1);
        output.push_str(",\n");
    }
    push_indent(output, indent);
    output.push(')');
}

/// Object ids and plain identifiers like `isa` or `path` need no quotes.
fn is_bare_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|c| c.is_ascii_alphanumeric() || b"_$/:.-".contains(&c))
}

fn write_key(output: &mut String, key: &str) {
    if is_bare_key(key) {
        output.push_str(key);
    } else {
        write_string(output, key);
    }
}

fn write_string(output: &mut String, s: &str) {
    output.push('"');
    for c in s.chars() {
        match c {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            _ => output.push(c),
        }
    }
    output.push('"');
}
