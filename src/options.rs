//! Option flag sets for connect, open and publish.
//!
//! Each set is an enum of named flags folded into one value at the call
//! site. The numeric values match the queue manager's constants so the
//! gateway can forward them unchanged.

macro_rules! flag_set {
    (
        $(#[$set_meta:meta])*
        $set:ident of $flag:ident {
            $($(#[$flag_meta:meta])* $name:ident = $bit:expr,)+
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $flag {
            $($(#[$flag_meta])* $name,)+
        }

        impl $flag {
            pub fn bit(self) -> u32 {
                match self {
                    $($flag::$name => $bit,)+
                }
            }
        }

        $(#[$set_meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $set(u32);

        impl $set {
            /// the combined numeric value
            pub fn bits(&self) -> u32 {
                self.0
            }

            pub fn contains(&self, flag: $flag) -> bool {
                self.0 & flag.bit() != 0
            }

            /// returns a copy with `flag` added
            pub fn with(self, flag: $flag) -> Self {
                $set(self.0 | flag.bit())
            }
        }

        impl FromIterator<$flag> for $set {
            fn from_iter<I: IntoIterator<Item = $flag>>(iter: I) -> Self {
                iter.into_iter().fold($set::default(), $set::with)
            }
        }
    };
}

flag_set! {
    /// How the connection is made.
    ConnectOptions of ConnectOption {
        /// connect as a client over a channel
        ClientBinding = 0x0000_0800,
    }
}

flag_set! {
    /// How an object is opened.
    OpenOptions of OpenOption {
        /// open for putting messages
        Output = 0x0000_0010,
    }
}

flag_set! {
    /// How a message is put.
    PublishOptions of PutOption {
        /// commit immediately, outside any unit of work
        NoSyncpoint = 0x0000_0004,
        /// generate a new message id
        NewMsgId = 0x0000_0040,
        /// generate a new correlation id
        NewCorrelId = 0x0000_0080,
        /// report a warning when no subscription matched the topic
        WarnIfNoSubsMatched = 0x0008_0000,
    }
}

impl PublishOptions {
    /// options used for the single greeting publish
    pub fn for_publish() -> PublishOptions {
        [
            PutOption::NoSyncpoint,
            PutOption::NewMsgId,
            PutOption::NewCorrelId,
            PutOption::WarnIfNoSubsMatched,
        ]
        .into_iter()
        .collect()
    }
}
