// fields.rs - `admit fields`: list field paths and their display labels.

use admit_goal::FieldPath;

pub fn execute() -> anyhow::Result<()> {
    for field in FieldPath::ALL {
        println!("{:<32} {}", field, field.label());
    }
    Ok(())
}
