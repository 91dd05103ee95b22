//! PEG grammar for style literals, map style ids and dataset scripts.
//!
//! This module is an internal implementation detail; the public entry points live
//! in the parent module.

use crate::layer::Color;
use crate::map::StyleId;

peg::parser!{pub grammar grammar() for str {

/// Grammar for style and dataset literals

rule ws() = [' '|'\t'|'\n'|'\r']*

rule hex_digit() = ['0'..='9'|'a'..='f'|'A'..='F']

rule hex_pair() -> u8
	= h:$(hex_digit()*<2>) {? u8::from_str_radix(h, 16).or(Err("hex byte")) }

rule hex_single() -> u8
	= h:$(hex_digit()) {? u8::from_str_radix(h, 16).map(|v| v * 17).or(Err("hex digit")) }

rule byte() -> u8
	= n:$(['0'..='9']*<1,3>) {? n.parse::<u8>().or(Err("channel value 0-255")) }

rule any_number() -> f64
	= s:$(['-'|'+']? ['0'..='9']+("."['0'..='9']+)?(['e'|'E']['-'|'+']?['0'..='9']+)?) {?
		s.parse::<f64>().or(Err("number"))
	}

rule unit() -> f64
	= x:any_number() {? if (0.0..=1.0).contains(&x) { Ok(x) } else { Err("alpha within [0, 1]") } }

rule comma() = ws() "," ws()

pub rule color() -> Color
	= "#" r:hex_pair() g:hex_pair() b:hex_pair() ![_] { Color::rgb(r, g, b) }
	/ "#" r:hex_single() g:hex_single() b:hex_single() ![_] { Color::rgb(r, g, b) }
	/ "rgba(" ws() r:byte() comma() g:byte() comma() b:byte() comma() a:unit() ws() ")" ![_] {
		Color::rgba(r, g, b, a)
	}
	/ "rgb(" ws() r:byte() comma() g:byte() comma() b:byte() ws() ")" ![_] { Color::rgb(r, g, b) }

rule ident() -> &'input str
	= s:$(['a'..='z'|'A'..='Z'|'_'|'$']['a'..='z'|'A'..='Z'|'0'..='9'|'_'|'$']*) { s }

rule scheme() -> &'input str
	= s:$(['a'..='z']['a'..='z'|'0'..='9'|'+'|'-'|'.']*) { s }

rule style_name() -> &'input str
	= s:$(['a'..='z'|'A'..='Z'|'0'..='9'|'_'|'-']+) { s }

pub rule style_id() -> StyleId
	= s:scheme() "://styles/" n:style_name() ![_] {
		StyleId { scheme: Some(s.to_string()), name: n.to_string() }
	}
	/ n:style_name() ![_] {
		StyleId { scheme: None, name: n.to_string() }
	}

pub rule coordinate_text() -> (f64, f64)
	= ws() lng:any_number() comma() lat:any_number() ws() ![_] { (lng, lat) }

rule declaration() = ("var" / "let" / "const") [' '|'\t']+

rule binding_path() -> &'input str
	= s:$(ident() ("." ident())*) { s }

/// `MS.data.bricks = ` as written by the data generators; yields the binding and
/// the offset where the value starts.
pub rule assignment() -> (&'input str, usize)
	= ws() declaration()? b:binding_path() ws() "=" p:position!() [_]* { (b, p) }

}}
