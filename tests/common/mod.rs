//! An in-process stand-in for a Redis server, speaking RESP through the crate's own codec.
//!
//! It implements just the commands the client wraps, keeps a keyspace per database, records every
//! request and answers a blocking pop on an empty list with an immediate timeout.

#![allow(dead_code)]

use std::{
	collections::{HashMap, VecDeque},
	net::SocketAddr,
	sync::{
		atomic::{AtomicUsize, Ordering},
		Arc, Mutex,
	},
};

use futures::{SinkExt, StreamExt};
use storepool::resp::{codec::Codec, Data, ReplyError};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::Framed;

type Bytes = Vec<u8>;
type Reply = Result<Data<'static>, String>;

#[derive(Debug, Clone)]
enum Value {
	Str(Bytes),
	Hash(Vec<(Bytes, Bytes)>),
	Set(Vec<Bytes>),
	List(VecDeque<Bytes>),
}

type Keyspace = HashMap<Bytes, Value>;

#[derive(Debug, Default)]
struct Store {
	dbs: HashMap<u32, Keyspace>,
	requests: Vec<Vec<Bytes>>,
}

pub struct StubServer {
	pub addr: SocketAddr,
	accepted: Arc<AtomicUsize>,
	store: Arc<Mutex<Store>>,
}

impl StubServer {
	pub async fn start() -> Self {
		Self::start_with_password(None).await
	}

	pub async fn start_with_password(password: Option<&str>) -> Self {
		let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub server");
		let addr = listener.local_addr().expect("stub server address");
		let accepted = Arc::new(AtomicUsize::new(0));
		let store = Arc::new(Mutex::new(Store::default()));
		let password = password.map(str::to_owned);

		let counter = Arc::clone(&accepted);
		let shared = Arc::clone(&store);
		tokio::spawn(async move {
			while let Ok((stream, _)) = listener.accept().await {
				counter.fetch_add(1, Ordering::SeqCst);
				tokio::spawn(serve(stream, Arc::clone(&shared), password.clone()));
			}
		});

		Self {
			addr,
			accepted,
			store,
		}
	}

	/// Target identifier for this server.
	pub fn target(&self) -> String {
		format!("redis://{}/0", self.addr)
	}

	/// Number of connections accepted so far.
	pub fn accepted(&self) -> usize {
		self.accepted.load(Ordering::SeqCst)
	}

	/// Arguments of every request named `name` received so far, without the name itself.
	pub fn requests(&self, name: &str) -> Vec<Vec<String>> {
		let store = self.store.lock().expect("store lock");
		store
			.requests
			.iter()
			.filter(|request| request[0].eq_ignore_ascii_case(name.as_bytes()))
			.map(|request| {
				request[1..]
					.iter()
					.map(|arg| String::from_utf8_lossy(arg).into_owned())
					.collect()
			})
			.collect()
	}
}

/// An address nothing listens on.
pub async fn unreachable_target() -> String {
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
	let addr = listener.local_addr().expect("address");
	drop(listener);

	format!("redis://{addr}/0")
}

async fn serve(stream: TcpStream, store: Arc<Mutex<Store>>, password: Option<String>) {
	let mut framed = Framed::new(stream, Codec);
	let mut authed = password.is_none();
	let mut db = 0;

	while let Some(Ok(Ok(request))) = framed.next().await {
		let args = match parse_request(request) {
			Some(args) if !args.is_empty() => args,
			_ => break,
		};

		let name = String::from_utf8_lossy(&args[0]).to_ascii_uppercase();
		let reply = if name == "AUTH" {
			let ok = matches!(&password, Some(pw) if args.last().map(Vec::as_slice) == Some(pw.as_bytes()));
			authed |= ok;
			if ok {
				Ok(Data::simple_string("OK"))
			} else {
				Err("WRONGPASS invalid username-password pair".to_owned())
			}
		} else if !authed {
			Err("NOAUTH Authentication required.".to_owned())
		} else {
			let mut store = store.lock().expect("store lock");
			store.requests.push(args.clone());
			match (name.as_str(), &args[1..]) {
				("SELECT", [index]) => match std::str::from_utf8(index)
					.ok()
					.and_then(|index| index.parse().ok())
				{
					Some(index) => {
						db = index;
						Ok(Data::simple_string("OK"))
					}
					None => Err("ERR DB index is out of range".to_owned()),
				},
				("FLUSHALL", []) => {
					store.dbs.clear();
					Ok(Data::simple_string("OK"))
				}
				(name, args) => execute(store.dbs.entry(db).or_default(), name, args),
			}
		};

		let sent = match reply {
			Ok(data) => framed.send(data).await,
			Err(msg) => framed.send(ReplyError(msg)).await,
		};
		if sent.is_err() {
			break;
		}
	}
}

fn parse_request(request: Data<'static>) -> Option<Vec<Bytes>> {
	request
		.into_array()
		.ok()?
		.into_iter()
		.map(|item| item.into_bulk_str().ok().map(|bytes| bytes.into_owned()))
		.collect()
}

fn bulk(bytes: Bytes) -> Data<'static> {
	Data::BulkString(bytes.into())
}

fn wrong_type() -> String {
	"WRONGTYPE Operation against a key holding the wrong kind of value".to_owned()
}

fn arity(name: &str) -> String {
	format!("ERR wrong number of arguments for '{}' command", name.to_lowercase())
}

fn execute(keys: &mut Keyspace, name: &str, args: &[Bytes]) -> Reply {
	match (name, args) {
		("PING", []) => Ok(Data::simple_string("PONG")),
		("PING", [msg]) => Ok(bulk(msg.clone())),
		("GET", [key]) => match keys.get(key) {
			None => Ok(Data::Null),
			Some(Value::Str(value)) => Ok(bulk(value.clone())),
			Some(_) => Err(wrong_type()),
		},
		("SET", [key, value]) | ("SET", [key, value, _, _]) => {
			keys.insert(key.clone(), Value::Str(value.clone()));
			Ok(Data::simple_string("OK"))
		}
		("SETNX", [key, value]) => {
			if keys.contains_key(key) {
				return Ok(Data::Integer(0));
			}
			keys.insert(key.clone(), Value::Str(value.clone()));
			Ok(Data::Integer(1))
		}
		("EXISTS", [key]) => Ok(Data::Integer(keys.contains_key(key) as i64)),
		("DEL", keys_to_delete) if !keys_to_delete.is_empty() => Ok(Data::Integer(
			keys_to_delete
				.iter()
				.filter(|key| keys.remove(*key).is_some())
				.count() as i64,
		)),
		("INCR", [key]) => add(keys, key, 1),
		("DECR", [key]) => add(keys, key, -1),
		("APPEND", [key, value]) => match keys
			.entry(key.clone())
			.or_insert_with(|| Value::Str(Vec::new()))
		{
			Value::Str(current) => {
				current.extend_from_slice(value);
				Ok(Data::Integer(current.len() as i64))
			}
			_ => Err(wrong_type()),
		},
		("EXPIRE", [key, seconds]) => {
			if std::str::from_utf8(seconds)
				.ok()
				.and_then(|s| s.parse::<i64>().ok())
				.is_none()
			{
				return Err("ERR value is not an integer or out of range".to_owned());
			}
			Ok(Data::Integer(keys.contains_key(key) as i64))
		}
		("HGET", [key, field]) => match keys.get(key) {
			None => Ok(Data::Null),
			Some(Value::Hash(hash)) => Ok(hash
				.iter()
				.find(|(f, _)| f == field)
				.map_or(Data::Null, |(_, v)| bulk(v.clone()))),
			Some(_) => Err(wrong_type()),
		},
		("HSET", [key, field, value]) | ("HSETNX", [key, field, value]) => {
			let only_new = name == "HSETNX";
			match keys
				.entry(key.clone())
				.or_insert_with(|| Value::Hash(Vec::new()))
			{
				Value::Hash(hash) => match hash.iter_mut().find(|(f, _)| f == field) {
					Some(_) if only_new => Ok(Data::Integer(0)),
					Some((_, current)) => {
						*current = value.clone();
						Ok(Data::Integer(0))
					}
					None => {
						hash.push((field.clone(), value.clone()));
						Ok(Data::Integer(1))
					}
				},
				_ => Err(wrong_type()),
			}
		}
		("HGETALL", [key]) | ("HVALS", [key]) => match keys.get(key) {
			None => Ok(Data::Array(Vec::new())),
			Some(Value::Hash(hash)) => Ok(Data::Array(
				hash.iter()
					.flat_map(|(f, v)| {
						let field = (name == "HGETALL").then(|| bulk(f.clone()));
						field.into_iter().chain([bulk(v.clone())])
					})
					.collect(),
			)),
			Some(_) => Err(wrong_type()),
		},
		("HLEN", [key]) => match keys.get(key) {
			None => Ok(Data::Integer(0)),
			Some(Value::Hash(hash)) => Ok(Data::Integer(hash.len() as i64)),
			Some(_) => Err(wrong_type()),
		},
		("HDEL", [key, fields @ ..]) if !fields.is_empty() => match keys.get_mut(key) {
			None => Ok(Data::Integer(0)),
			Some(Value::Hash(hash)) => {
				let before = hash.len();
				hash.retain(|(f, _)| !fields.contains(f));
				let removed = before - hash.len();
				if hash.is_empty() {
					keys.remove(key);
				}
				Ok(Data::Integer(removed as i64))
			}
			Some(_) => Err(wrong_type()),
		},
		("SADD", [key, members @ ..]) if !members.is_empty() => match keys
			.entry(key.clone())
			.or_insert_with(|| Value::Set(Vec::new()))
		{
			Value::Set(set) => {
				let mut added = 0;
				for member in members {
					if !set.contains(member) {
						set.push(member.clone());
						added += 1;
					}
				}
				Ok(Data::Integer(added))
			}
			_ => Err(wrong_type()),
		},
		("SCARD", [key]) => match keys.get(key) {
			None => Ok(Data::Integer(0)),
			Some(Value::Set(set)) => Ok(Data::Integer(set.len() as i64)),
			Some(_) => Err(wrong_type()),
		},
		("SPOP", [key]) | ("SRANDMEMBER", [key]) => {
			let pop = name == "SPOP";
			match keys.get_mut(key) {
				None => Ok(Data::Null),
				Some(Value::Set(set)) => {
					let member = if pop { set.pop() } else { set.last().cloned() };
					if set.is_empty() {
						keys.remove(key);
					}
					Ok(member.map_or(Data::Null, bulk))
				}
				Some(_) => Err(wrong_type()),
			}
		}
		("SREM", [key, members @ ..]) if !members.is_empty() => match keys.get_mut(key) {
			None => Ok(Data::Integer(0)),
			Some(Value::Set(set)) => {
				let before = set.len();
				set.retain(|m| !members.contains(m));
				let removed = before - set.len();
				if set.is_empty() {
					keys.remove(key);
				}
				Ok(Data::Integer(removed as i64))
			}
			Some(_) => Err(wrong_type()),
		},
		("LPUSH", [key, values @ ..]) if !values.is_empty() => match keys
			.entry(key.clone())
			.or_insert_with(|| Value::List(VecDeque::new()))
		{
			Value::List(list) => {
				for value in values {
					list.push_front(value.clone());
				}
				Ok(Data::Integer(list.len() as i64))
			}
			_ => Err(wrong_type()),
		},
		("BRPOP", [key, _timeout]) => match keys.get_mut(key) {
			None => Ok(Data::Null),
			Some(Value::List(list)) => {
				let value = list.pop_back();
				if list.is_empty() {
					keys.remove(key);
				}
				Ok(value.map_or(Data::Null, |value| {
					Data::Array(vec![bulk(key.clone()), bulk(value)])
				}))
			}
			Some(_) => Err(wrong_type()),
		},
		("FLUSHDB", []) => {
			keys.clear();
			Ok(Data::simple_string("OK"))
		}
		("DBSIZE", []) => Ok(Data::Integer(keys.len() as i64)),
		(
			"PING" | "SELECT" | "GET" | "SET" | "SETNX" | "EXISTS" | "DEL" | "INCR" | "DECR"
			| "APPEND" | "EXPIRE" | "HGET" | "HSET" | "HSETNX" | "HGETALL" | "HVALS" | "HLEN"
			| "HDEL" | "SADD" | "SCARD" | "SPOP" | "SRANDMEMBER" | "SREM" | "LPUSH" | "BRPOP"
			| "FLUSHDB" | "FLUSHALL" | "DBSIZE",
			_,
		) => Err(arity(name)),
		_ => Err(format!("ERR unknown command '{name}'")),
	}
}

fn add(keys: &mut Keyspace, key: &Bytes, by: i64) -> Reply {
	let current = match keys.get(key) {
		None => 0,
		Some(Value::Str(value)) => match std::str::from_utf8(value)
			.ok()
			.and_then(|value| value.parse::<i64>().ok())
		{
			Some(current) => current,
			None => return Err("ERR value is not an integer or out of range".to_owned()),
		},
		Some(_) => return Err(wrong_type()),
	};

	let next = current + by;
	keys.insert(key.clone(), Value::Str(next.to_string().into_bytes()));
	Ok(Data::Integer(next))
}
