//! Convention interfaces: named builder methods mapped onto a build command.
//!
//! A [`ConventionInterface`] declares methods by name.  Every method either
//! starts with the prefix (default `"with"`) or is a *default method* with
//! a body.  The interface is checked once, when a proxy is created, and
//! compiled into a dispatch table:
//!
//! | Call                              | Effect                               |
//! |-----------------------------------|--------------------------------------|
//! | `withName()`                      | `generate_value("name")`             |
//! | `withName(Arg::Generator(g))`     | `generate_value_with("name", g)`     |
//! | `withName(Arg::Value(v))`         | `with_value("name", v)`              |
//! | default method                    | its body, given the proxy itself     |
//!
//! The property name is the method name minus the prefix, minus one leading
//! underscore, with the first character lower-cased: `withShortName` and
//! `with_short_name` target `shortName` and `short_name`.
//!
//! # Example
//!
//! ```rust,ignore
//! let people = ConventionInterface::new("PersonBuilder", "Person")
//!     .method("withName")
//!     .method("withAge")
//!     .default_method("named_jan", |proxy, _args| proxy.set("withName", "Jan"));
//!
//! let person = engine
//!     .start_as(&people)?
//!     .call("named_jan", vec![])?
//!     .schedule("withAge")?
//!     .construct()?;
//! ```

use std::collections::HashMap;
use std::rc::Rc;

use mould_core::{BeanRef, MouldError, MouldResult, TypeName, Value};
use mould_generate::ValueGenerator;

use crate::BuildCommand;

/// Argument of a proxy call.
#[derive(Clone)]
pub enum Arg {
    Value(Value),
    Generator(Rc<dyn ValueGenerator>),
}

impl Arg {
    pub fn value(value: impl Into<Value>) -> Self {
        Arg::Value(value.into())
    }

    pub fn generator(generator: impl ValueGenerator + 'static) -> Self {
        Arg::Generator(Rc::new(generator))
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

impl std::fmt::Debug for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arg::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Arg::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

/// Body of a default method.  Receives the proxy it was called on, so it
/// can chain further calls, and returns it.
pub type DefaultMethod =
    Rc<dyn for<'e> Fn(ConventionProxy<'e>, &[Arg]) -> MouldResult<ConventionProxy<'e>>>;

#[derive(Clone)]
enum Method {
    Convention,
    Default(DefaultMethod),
}

/// Declaration of a convention interface over one bean type.
#[derive(Clone)]
pub struct ConventionInterface {
    name:      String,
    bean_type: TypeName,
    prefix:    Option<String>,
    methods:   Vec<(String, Method)>,
}

impl ConventionInterface {
    pub fn new(name: impl Into<String>, bean_type: impl Into<TypeName>) -> Self {
        Self {
            name:      name.into(),
            bean_type: bean_type.into(),
            prefix:    None,
            methods:   Vec::new(),
        }
    }

    /// Method prefix for this interface, instead of the engine's.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Declare a convention method.
    pub fn method(mut self, name: impl Into<String>) -> Self {
        self.methods.push((name.into(), Method::Convention));
        self
    }

    /// Declare a method with a body.
    pub fn default_method<F>(mut self, name: impl Into<String>, body: F) -> Self
    where
        F: for<'e> Fn(ConventionProxy<'e>, &[Arg]) -> MouldResult<ConventionProxy<'e>> + 'static,
    {
        self.methods.push((name.into(), Method::Default(Rc::new(body))));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bean_type(&self) -> &TypeName {
        &self.bean_type
    }

    /// Validate every declared method and build the dispatch table.
    pub(crate) fn dispatch(&self, default_prefix: &str) -> MouldResult<Rc<Dispatch>> {
        let prefix = self.prefix.as_deref().unwrap_or(default_prefix);
        let mut handlers = HashMap::with_capacity(self.methods.len());
        for (method, kind) in &self.methods {
            let handler = match kind {
                Method::Default(body) => Handler::Default(Rc::clone(body)),
                Method::Convention => match property_name(method, prefix) {
                    Some(property) => Handler::Property(property),
                    None => {
                        return Err(MouldError::ProxyConfiguration {
                            interface: self.name.clone(),
                            method:    method.clone(),
                            prefix:    prefix.to_string(),
                        });
                    }
                },
            };
            handlers.insert(method.clone(), handler);
        }
        Ok(Rc::new(Dispatch { interface: self.name.clone(), handlers }))
    }
}

impl std::fmt::Debug for ConventionInterface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let methods: Vec<&str> = self.methods.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("ConventionInterface")
            .field("name", &self.name)
            .field("bean_type", &self.bean_type)
            .field("prefix", &self.prefix)
            .field("methods", &methods)
            .finish()
    }
}

/// Property targeted by a convention method, or `None` if the method does
/// not follow the convention.
fn property_name(method: &str, prefix: &str) -> Option<String> {
    let rest = method.strip_prefix(prefix)?;
    let rest = rest.strip_prefix('_').unwrap_or(rest);
    let mut chars = rest.chars();
    let first = chars.next()?;
    Some(first.to_lowercase().chain(chars).collect())
}

#[derive(Clone)]
enum Handler {
    Property(String),
    Default(DefaultMethod),
}

pub(crate) struct Dispatch {
    interface: String,
    handlers:  HashMap<String, Handler>,
}

impl Dispatch {
    fn invalid(&self, method: &str, reason: impl Into<String>) -> MouldError {
        MouldError::InvalidInvocation {
            interface: self.interface.clone(),
            method:    method.to_string(),
            reason:    reason.into(),
        }
    }
}

// ── ConventionProxy ───────────────────────────────────────────────────────────

/// A build command viewed through a convention interface.
pub struct ConventionProxy<'e> {
    command:  BuildCommand<'e>,
    dispatch: Rc<Dispatch>,
}

impl<'e> ConventionProxy<'e> {
    pub(crate) fn new(command: BuildCommand<'e>, dispatch: Rc<Dispatch>) -> Self {
        Self { command, dispatch }
    }

    /// Invoke a declared method.
    pub fn call(self, method: &str, args: Vec<Arg>) -> MouldResult<Self> {
        let handler = match self.dispatch.handlers.get(method) {
            Some(handler) => handler.clone(),
            None => return Err(self.dispatch.invalid(method, "method is not declared")),
        };
        match handler {
            Handler::Default(body) => body(self, &args),
            Handler::Property(property) => {
                if args.len() > 1 {
                    let reason = format!("takes at most one argument, got {}", args.len());
                    return Err(self.dispatch.invalid(method, reason));
                }
                let Self { command, dispatch } = self;
                let command = match args.into_iter().next() {
                    None => command.generate_value(&property)?,
                    Some(Arg::Generator(generator)) => {
                        command.generate_value_with(&property, &*generator)?
                    }
                    Some(Arg::Value(value)) => command.with_value(&property, value)?,
                };
                Ok(Self { command, dispatch })
            }
        }
    }

    /// `call(method, [value])`.
    pub fn set(self, method: &str, value: impl Into<Value>) -> MouldResult<Self> {
        self.call(method, vec![Arg::value(value)])
    }

    /// `call(method, [])`: schedule the property.
    pub fn schedule(self, method: &str) -> MouldResult<Self> {
        self.call(method, Vec::new())
    }

    /// `call(method, [generator])`.
    pub fn generate_with(
        self,
        method: &str,
        generator: impl ValueGenerator + 'static,
    ) -> MouldResult<Self> {
        self.call(method, vec![Arg::generator(generator)])
    }

    // ── Forwarded command surface ─────────────────────────────────────────

    fn lift(
        self,
        f: impl FnOnce(BuildCommand<'e>) -> MouldResult<BuildCommand<'e>>,
    ) -> MouldResult<Self> {
        let Self { command, dispatch } = self;
        Ok(Self { command: f(command)?, dispatch })
    }

    pub fn with_value(self, property: &str, value: impl Into<Value>) -> MouldResult<Self> {
        self.lift(|command| command.with_value(property, value))
    }

    pub fn generate_value(self, property: &str) -> MouldResult<Self> {
        self.lift(|command| command.generate_value(property))
    }

    pub fn generate_value_with(
        self,
        property: &str,
        generator: &dyn ValueGenerator,
    ) -> MouldResult<Self> {
        self.lift(|command| command.generate_value_with(property, generator))
    }

    pub fn load(self, source: &BeanRef, exclusions: &[&str]) -> MouldResult<Self> {
        self.lift(|command| command.load(source, exclusions))
    }

    pub fn fill(self) -> Self {
        let Self { command, dispatch } = self;
        Self { command: command.fill(), dispatch }
    }

    pub fn construct(&mut self) -> MouldResult<BeanRef> {
        self.command.construct()
    }

    pub fn construct_with(&mut self, auto_save: bool) -> MouldResult<BeanRef> {
        self.command.construct_with(auto_save)
    }

    pub fn save(&mut self) -> MouldResult<BeanRef> {
        self.command.save()
    }

    pub fn do_with(self, f: impl FnOnce(&BeanRef) -> MouldResult<()>) -> MouldResult<Self> {
        self.lift(|command| command.do_with(f))
    }

    pub fn map(self, f: impl FnOnce(BeanRef) -> MouldResult<BeanRef>) -> MouldResult<Self> {
        self.lift(|command| command.map(f))
    }

    /// Same command, different interface.
    pub fn as_convention(self, interface: &ConventionInterface) -> MouldResult<ConventionProxy<'e>> {
        self.command.as_convention(interface)
    }

    pub fn command(&self) -> &BuildCommand<'e> {
        &self.command
    }

    pub fn into_command(self) -> BuildCommand<'e> {
        self.command
    }

    pub fn bean(&self) -> &BeanRef {
        self.command.bean()
    }
}

impl std::fmt::Debug for ConventionProxy<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConventionProxy")
            .field("interface", &self.dispatch.interface)
            .field("command", &self.command)
            .finish()
    }
}
