//! Declarative sugar for defining types.

// =============================================================================
// type_def! - Declare a TypeDef constructor function
// =============================================================================

/// Declare a function returning a [`TypeDef`](crate::TypeDef) whose level
/// holds the listed methods. The function is named after the type in
/// snake case.
///
/// # Example
///
/// ```ignore
/// type_def! {
///     pub HasName {
///         fn greet(_this, _args) { Ok(Value::from("hi")) }
///     }
/// }
///
/// let id = catalog.define(has_name())?;
/// ```
///
/// A parent is named with `extends`:
///
/// ```ignore
/// type_def! {
///     Dog extends Animal {
///         fn speak(_this, _args) { Ok(Value::from("woof")) }
///     }
/// }
/// ```
#[macro_export]
macro_rules! type_def {
    (
        $vis:vis $name:ident $(extends $parent:ident)? {
            $( fn $method:ident($this:ident, $args:ident) $body:block )*
        }
    ) => {
        $crate::paste::paste! {
            $vis fn [<$name:snake>]() -> $crate::TypeDef {
                #[allow(unused_mut)]
                let mut def = $crate::TypeDef::new(stringify!($name));
                $( def = def.extends(stringify!($parent)); )?
                $(
                    def = def.method(
                        stringify!($method),
                        |$this: &mut $crate::Instance, $args: &[$crate::Value]| -> ::core::result::Result<$crate::Value, $crate::MemberError> { $body },
                    );
                )*
                def
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Catalog, Value};

    type_def! {
        Greeter {
            fn greet(_this, _args) { Ok(Value::from("hi")) }
            fn echo(_this, args) { Ok(args.first().cloned().unwrap_or_default()) }
        }
    }

    type_def! {
        LoudGreeter extends Greeter {
            fn greet(_this, _args) { Ok(Value::from("HI")) }
        }
    }

    #[test]
    fn test_type_def_macro() {
        let mut catalog = Catalog::new();
        let greeter = catalog.define(greeter()).unwrap();
        let loud = catalog.define(loud_greeter()).unwrap();

        let mut plain = catalog.instantiate(greeter, &[]).unwrap();
        assert_eq!(plain.call("greet", &[]).unwrap(), Value::from("hi"));
        assert_eq!(plain.call("echo", &[Value::Int(7)]).unwrap(), Value::Int(7));

        let mut derived = catalog.instantiate(loud, &[]).unwrap();
        assert_eq!(derived.call("greet", &[]).unwrap(), Value::from("HI"));
        assert_eq!(derived.call("echo", &[]).unwrap(), Value::Null);
    }
}
