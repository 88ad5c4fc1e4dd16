
error_chain! {
    errors {
        #[doc = "A servo channel could not be commanded."]
        HardwareFault(channel: u8) {
            description("hardware fault")
            display("hardware fault on servo channel {}", channel)
        }
        #[doc = "A command line argument could not be understood."]
        InvalidArgument(arg: ::std::string::String) {
            description("invalid argument")
            display("invalid argument: {}", arg)
        }
    }
}
