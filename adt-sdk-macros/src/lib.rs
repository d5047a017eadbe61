use proc_macro::TokenStream;
use proc_macro2::Span;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::spanned::Spanned;
use syn::ItemImpl;
use syn::ReturnType;
use syn::Signature;
use syn::Visibility;

/// Collects the typed arguments of `sig`, or an error pointing at a `self` receiver.
fn typed_args(sig: &Signature) -> Result<Vec<&syn::PatType>, syn::Error> {
    sig.inputs
        .iter()
        .map(|arg| match arg {
            syn::FnArg::Receiver(receiver) => Err(syn::Error::new(
                receiver.span(),
                "#[contract] methods can't take `self`, load the state inside the method instead",
            )),
            syn::FnArg::Typed(typed) => Ok(typed),
        })
        .collect()
}

/// Generates the code that reads the JSON input into local bindings named after the arguments.
fn input_deser(args: &[&syn::PatType]) -> TokenStream2 {
    if args.is_empty() {
        return TokenStream2::new();
    }

    let mut fields = TokenStream2::new();
    let mut arg_list = TokenStream2::new();
    for typed in args {
        let ident = &typed.pat;
        let ty = &typed.ty;
        fields.extend(quote! {
            #ident: #ty,
        });
        arg_list.extend(quote! {
            #ident,
        });
    }
    quote! {
        #[derive(adt_sdk::serde::Deserialize)]
        #[serde(crate = "adt_sdk::serde")]
        struct Input {
            #fields
        }
        let Input {
            #arg_list
        } = adt_sdk::serde_json::from_slice(
            &adt_sdk::input().expect("Expected input since method has arguments.")
        ).expect("Failed to deserialize input from JSON.");
    }
}

/// Returns `true` if the method returns a type named `Result`.
fn returns_result(output: &ReturnType) -> bool {
    match output {
        ReturnType::Default => false,
        ReturnType::Type(_, ty) => match ty.as_ref() {
            syn::Type::Path(path) => path
                .path
                .segments
                .last()
                .map(|segment| segment.ident == "Result")
                .unwrap_or(false),
            _ => false,
        },
    }
}

/// Walks over public methods and generates wrappers for each method it finds.
///
/// The generated wrapper reads method arguments with `adt_sdk::input`, deserializes them, and
/// calls the original method. When the original method returns, the wrapper serializes the
/// returned value and writes the serialized value with `adt_sdk::output`.
///
/// The wrapper of `method` is a plain function named `__contract_method`, so it can be called
/// against the mocked host. On wasm32 it is also exported as `method`.
///
/// A method that returns `Result<T, E>` has `T` written to the output. `Err(e)` aborts the
/// call through `adt_sdk::panic` with `e.to_string()` as the message, so the host discards
/// every storage change of the call.
///
/// # Example
/// ```ignore
/// use adt_sdk::contract;
///
/// struct Contract {};
///
/// #[contract]
/// impl Contract {
///     pub fn say(msg: String) {
///         // say "hello"
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn contract(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = match syn::parse::<ItemImpl>(item) {
        Ok(input) => input,
        Err(_) => {
            return TokenStream::from(
                syn::Error::new(
                    Span::call_site(),
                    "#[contract] can only be used on impl sections.",
                )
                .to_compile_error(),
            )
        }
    };

    let struct_type = &input.self_ty;
    let mut generated_code = TokenStream2::new();
    for item in &input.items {
        let method = match item {
            syn::ImplItem::Method(method) => method,
            syn::ImplItem::Const(_) => continue,
            other => {
                return TokenStream::from(
                    syn::Error::new(
                        other.span(),
                        "#[contract] only supports methods and constants for now.",
                    )
                    .to_compile_error(),
                )
            }
        };
        if !matches!(method.vis, Visibility::Public(_)) {
            continue;
        }

        let ident = &method.sig.ident;
        let args = match typed_args(&method.sig) {
            Ok(args) => args,
            Err(err) => return TokenStream::from(err.to_compile_error()),
        };
        let input_deser = input_deser(&args);
        let arg_names = args.iter().map(|typed| &typed.pat);
        let call = quote! {
            #struct_type::#ident(#(#arg_names),*)
        };
        let call = if returns_result(&method.sig.output) {
            quote! {
                match #call {
                    Ok(value) => value,
                    Err(err) => adt_sdk::panic(&err.to_string()),
                }
            }
        } else {
            call
        };
        let output_serialization = match method.sig.output {
            ReturnType::Default => quote! {
                let _ = result;
            },
            ReturnType::Type(_, _) => quote! {
                let result = adt_sdk::serde_json::to_vec(&result)
                    .expect("Failed to serialize the return value using JSON.");
                adt_sdk::output(&result);
            },
        };
        let entry = format_ident!("__contract_{}", ident);
        generated_code.extend(quote! {
            #[doc(hidden)]
            pub fn #entry() {
                #input_deser
                let result = #call;
                #output_serialization
            }

            #[cfg(target_arch = "wasm32")]
            #[no_mangle]
            pub extern "C" fn #ident() {
                adt_sdk::setup_panic_hook();
                adt_sdk::logger::init();
                #entry()
            }
        })
    }

    TokenStream::from(quote! {
        #input
        #generated_code
    })
}
