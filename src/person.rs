//! The `Person` entity and its builder.
//!
//! This is the shape `datacompat` emits for `demos/person_data.rs`: an
//! immutable value with private fields and accessors, and a builder that
//! stages values through chained `set_*` calls before a terminal `build()`.
//!
//! ```
//! use datacompat::person::PersonBuilder;
//! let person = PersonBuilder::new("Extra info")
//!     .set_age(31)
//!     .set_name("Tobrun Van Nuland")
//!     .set_nickname("Nurbot")
//!     .build();
//! assert_eq!(person.nickname(), "Nurbot");
//! ```

use std::fmt;

/// Represents a person.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Person {
    name: String,
    nickname: String,
    age: i32,
    extra_info: String,
}

impl Person {
    /// Starts a [`PersonBuilder`], `extra_info` is required up front.
    pub fn builder(extra_info: impl Into<String>) -> PersonBuilder {
        PersonBuilder::new(extra_info)
    }
    // Fields are only exposed through "getters", which yields
    // true immutability for a person after creation.
    /// The full name.
    pub fn name(&self) -> &str {
        &self.name
    }
    /// The nickname.
    pub fn nickname(&self) -> &str {
        &self.nickname
    }
    /// The age.
    pub fn age(&self) -> i32 {
        self.age
    }
    /// Extra information supplied when the builder was created.
    pub fn extra_info(&self) -> &str {
        &self.extra_info
    }
    /// Convert to a builder allowing to change properties.
    pub fn to_builder(&self) -> PersonBuilder {
        PersonBuilder {
            name: self.name.clone(),
            nickname: self.nickname.clone(),
            age: self.age,
            extra_info: self.extra_info.clone(),
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Person(name={:?}, nickname={:?}, age={:?}, extra_info={:?})",
            self.name, self.nickname, self.age, self.extra_info
        )
    }
}

/// Composes and builds a [`Person`].
///
/// Setters can be called in any order and any number of times, the last
/// value set for a field is the one that ends up in the person.
#[derive(Debug, Clone)]
pub struct PersonBuilder {
    name: String,
    nickname: String,
    age: i32,
    extra_info: String,
}

impl PersonBuilder {
    /// Creates a builder, `extra_info` is fixed from here on.
    pub fn new(extra_info: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            nickname: String::new(),
            age: 0,
            extra_info: extra_info.into(),
        }
    }
    /// Set the full name.
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }
    /// Set the nickname.
    pub fn set_nickname(&mut self, nickname: impl Into<String>) -> &mut Self {
        self.nickname = nickname.into();
        self
    }
    /// Set the age.
    pub fn set_age(&mut self, age: i32) -> &mut Self {
        self.age = age;
        self
    }
    /// Returns a [`Person`] holding the values staged so far.
    ///
    /// The builder is left untouched, so it can be adjusted and built again.
    pub fn build(&self) -> Person {
        Person {
            name: self.name.clone(),
            nickname: self.nickname.clone(),
            age: self.age,
            extra_info: self.extra_info.clone(),
        }
    }
}

/// Creates a [`Person`] by handing a fresh builder to `initializer`.
pub fn person(extra_info: impl Into<String>, initializer: impl FnOnce(&mut PersonBuilder)) -> Person {
    let mut builder = PersonBuilder::new(extra_info);
    initializer(&mut builder);
    builder.build()
}
