// Declarations read by `datacompat demos/person_data.rs`.
// The generated `person.rs` has the same shape as `src/person.rs`.

/// Represents a person.
#[data_compat(derive(Eq, Hash))]
struct PersonData {
    /// The full name.
    #[default(String::new())]
    name: String,
    /// The nickname.
    #[default(String::new())]
    nickname: String,
    /// The age.
    #[default(0)]
    age: i32,
    /// Extra information supplied when the builder was created.
    extra_info: String,
}
