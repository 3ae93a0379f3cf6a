//! Declared signatures and binding calls against them.

use std::collections::BTreeSet;

use tracing::trace;

use crate::{
    error::BindError,
    snapshot::CallArguments,
    value::{Kwargs, Value},
};

/// A named parameter, optionally with a default value.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// The name of the parameter.
    name: String,
    /// The value used when the call does not bind the parameter.
    default: Option<Value>,
}

impl Parameter {
    /// The name of the parameter.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The default value of the parameter, if any.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// The declared parameters of a function.
///
/// A signature is built once per decorated function and then binds every call to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    /// The name of the function, used in binding errors.
    name: String,
    /// Parameters that may be passed by position or by keyword.
    positional: Vec<Parameter>,
    /// The name of the `*args` parameter.
    var_positional: Option<String>,
    /// Parameters that may only be passed by keyword.
    keyword_only: Vec<Parameter>,
    /// The name of the `**kwargs` parameter.
    var_keyword: Option<String>,
}

impl Signature {
    /// Starts declaring the signature of the function `name`.
    pub fn builder(name: impl Into<String>) -> SignatureBuilder {
        SignatureBuilder {
            signature: Signature {
                name: name.into(),
                ..Signature::default()
            },
        }
    }

    /// The name of the function.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The positional-or-keyword parameters, in declaration order.
    pub fn positional(&self) -> &[Parameter] {
        &self.positional
    }

    /// The keyword-only parameters, in declaration order.
    pub fn keyword_only(&self) -> &[Parameter] {
        &self.keyword_only
    }

    /// The name of the `*args` parameter, if declared.
    pub fn var_positional(&self) -> Option<&str> {
        self.var_positional.as_deref()
    }

    /// The name of the `**kwargs` parameter, if declared.
    pub fn var_keyword(&self) -> Option<&str> {
        self.var_keyword.as_deref()
    }

    /// Binds the arguments of one call to the declared parameters.
    pub fn bind(&self, args: &[Value], kwargs: &Kwargs) -> Result<CallArguments, BindError> {
        let mut argsdict = Kwargs::new();
        let mut varargs = Vec::new();

        for (i, value) in args.iter().enumerate() {
            match self.positional.get(i) {
                Some(param) => {
                    argsdict.insert(param.name.clone(), value.clone());
                }
                None if self.var_positional.is_some() => varargs.push(value.clone()),
                None => {
                    return Err(BindError::TooManyPositional {
                        function: self.name.clone(),
                        max: self.positional.len(),
                        given: args.len(),
                    })
                }
            }
        }

        let mut varkwargs = Kwargs::new();

        for (name, value) in kwargs {
            if self.declares(name) {
                if argsdict.contains_key(name) {
                    return Err(BindError::MultipleValues {
                        function: self.name.clone(),
                        name: name.clone(),
                    });
                }
                argsdict.insert(name.clone(), value.clone());
            } else if self.var_keyword.is_some() {
                varkwargs.insert(name.clone(), value.clone());
            } else {
                return Err(BindError::UnexpectedKeyword {
                    function: self.name.clone(),
                    name: name.clone(),
                });
            }
        }

        for param in self.positional.iter().chain(&self.keyword_only) {
            if argsdict.contains_key(&param.name) {
                continue;
            }

            match &param.default {
                Some(default) => {
                    argsdict.insert(param.name.clone(), default.clone());
                }
                None => {
                    return Err(BindError::MissingParameter {
                        function: self.name.clone(),
                        name: param.name.clone(),
                    })
                }
            }
        }

        trace!(
            function = %self.name,
            varargs = varargs.len(),
            varkwargs = varkwargs.len(),
            "bound call arguments"
        );

        Ok(CallArguments::new(
            args.to_vec(),
            kwargs.clone(),
            varargs,
            varkwargs,
            argsdict,
        ))
    }

    /// The first parameter name that is declared more than once, if any.
    fn duplicate_name(&self) -> Option<&str> {
        let mut names = BTreeSet::new();

        self.positional
            .iter()
            .chain(&self.keyword_only)
            .map(|param| param.name.as_str())
            .chain(self.var_positional.as_deref())
            .chain(self.var_keyword.as_deref())
            .find(|name| !names.insert(*name))
    }

    /// Whether `name` is a declared, non-variadic parameter.
    fn declares(&self, name: &str) -> bool {
        self.positional
            .iter()
            .chain(&self.keyword_only)
            .any(|param| param.name == name)
    }
}

/// Declares a [`Signature`] parameter by parameter.
#[derive(Debug, Clone)]
pub struct SignatureBuilder {
    /// The signature declared so far.
    signature: Signature,
}

impl SignatureBuilder {
    /// Adds a required positional-or-keyword parameter.
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.signature.positional.push(Parameter {
            name: name.into(),
            default: None,
        });
        self
    }

    /// Adds a positional-or-keyword parameter with a default value.
    pub fn param_with_default(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.signature.positional.push(Parameter {
            name: name.into(),
            default: Some(default.into()),
        });
        self
    }

    /// Declares the `*args` parameter.
    pub fn var_positional(mut self, name: impl Into<String>) -> Self {
        self.signature.var_positional = Some(name.into());
        self
    }

    /// Adds a required keyword-only parameter.
    pub fn keyword_only(mut self, name: impl Into<String>) -> Self {
        self.signature.keyword_only.push(Parameter {
            name: name.into(),
            default: None,
        });
        self
    }

    /// Adds a keyword-only parameter with a default value.
    pub fn keyword_only_with_default(
        mut self,
        name: impl Into<String>,
        default: impl Into<Value>,
    ) -> Self {
        self.signature.keyword_only.push(Parameter {
            name: name.into(),
            default: Some(default.into()),
        });
        self
    }

    /// Declares the `**kwargs` parameter.
    pub fn var_keyword(mut self, name: impl Into<String>) -> Self {
        self.signature.var_keyword = Some(name.into());
        self
    }

    /// Finishes the declaration.
    ///
    /// Parameter names are not checked here; a name declared twice binds to whichever
    /// declaration comes first. Use [`SignatureBuilder::try_build`] to reject such signatures.
    pub fn build(self) -> Signature {
        self.signature
    }

    /// Finishes the declaration, failing if a parameter name is declared twice.
    pub fn try_build(self) -> Result<Signature, BindError> {
        if let Some(name) = self.signature.duplicate_name() {
            return Err(BindError::DuplicateParameter {
                function: self.signature.name.clone(),
                name: name.to_owned(),
            });
        }

        Ok(self.signature)
    }
}
